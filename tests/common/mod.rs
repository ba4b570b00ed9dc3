//! Common Test Utilities
//!
//! Shared helpers for building input tables and loading the sample data
//! shipped under `data/`.

#![allow(dead_code)]

use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use timeout_tree_analysis::errors::AppResult;
use timeout_tree_analysis::processor::{CsvProcessor, IngestionOptions};
use timeout_tree_analysis::types::InputSet;

/// Fixed section used by most tests: two branching factors, uniform weekly levels
pub const FIXED_SECTION: &str = "\
Ac,Ro,AS,MS,NS,Br,Dp,Td
4320,1008,250,3000,200,2;4,20,1008
";

pub const SCENARIO_HEADER: &str = "Fe,Ex,Pr,Le,Va,Co\n";

/// Cost-of-capital values of the three sample tables, in file order
pub const SAMPLE_COSTS_OF_CAPITAL: [f64; 3] = [0.001, 0.01, 0.10];

/// Build a table from the standard fixed section and the given scenario rows
pub fn table_with_rows(rows: &[&str]) -> String {
    let mut table = String::from(FIXED_SECTION);
    table.push_str(SCENARIO_HEADER);
    for row in rows {
        table.push_str(row);
        table.push('\n');
    }
    table
}

/// Ingest a table held in memory
pub fn ingest(contents: &str, options: IngestionOptions) -> AppResult<InputSet> {
    CsvProcessor::new(options).read(Cursor::new(contents.to_string()))
}

pub fn skip_invalid() -> IngestionOptions {
    IngestionOptions {
        skip_invalid_rows: true,
        ..Default::default()
    }
}

/// Write a table into a fresh temporary directory
pub fn write_input(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

pub fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Path of `data/in_tt_analysisNN.csv`
pub fn sample_path(number: u32) -> PathBuf {
    data_dir().join(format!("in_tt_analysis{:02}.csv", number))
}
