//! `--number NN` runs against a data directory chosen through the environment

use crate::common::table_with_rows;
use serial_test::serial;
use std::env;
use tempfile::TempDir;
use timeout_tree_analysis::analysis::OutputFormat;
use timeout_tree_analysis::cli::commands::delay::DelayCommand;
use timeout_tree_analysis::cli::commands::sweep::SweepCommand;
use timeout_tree_analysis::cli::commands::IoArgs;

fn numbered_io(number: u32, format: OutputFormat) -> IoArgs {
    IoArgs {
        input: None,
        number: Some(number),
        output: None,
        format,
        skip_invalid: false,
    }
}

fn data_dir_with_input(number: u32) -> TempDir {
    let dir = TempDir::new().unwrap();
    let table = table_with_rows(&["10,2,0.5,1000000,10000,0.01", "20,2,0.5,1000000,10000,0.1"]);
    std::fs::write(
        dir.path().join(format!("in_tt_analysis{:02}.csv", number)),
        table,
    )
    .unwrap();
    dir
}

#[test]
#[serial]
fn test_delay_writes_numbered_output() {
    let dir = data_dir_with_input(7);
    env::set_var("TT_DATA_DIR", dir.path());

    let command = DelayCommand {
        io: numbered_io(7, OutputFormat::Annotated),
    };
    let result = command.run();
    env::remove_var("TT_DATA_DIR");
    result.unwrap();

    let output = std::fs::read_to_string(dir.path().join("out_tt_analysis07.csv")).unwrap();
    assert!(output.starts_with("Timeout-Tree (TT) analysis\n"));
    assert!(output.contains("FractionTTLeaves,SecurityDelayBlocks"));
}

#[test]
#[serial]
fn test_sweep_writes_numbered_output() {
    let dir = data_dir_with_input(8);
    env::set_var("TT_DATA_DIR", dir.path());

    let command = SweepCommand {
        io: numbered_io(8, OutputFormat::Csv),
        table: false,
        branching_factors: vec![],
        max_depth: None,
        level_timeout: None,
        node_vbytes: None,
    };
    let result = command.run();
    env::remove_var("TT_DATA_DIR");
    result.unwrap();

    let output = std::fs::read_to_string(dir.path().join("out_tt_sweep08.csv")).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[3].ends_with("FlipDepth,FlipBranching,FlipLeafCount"));
}

#[test]
#[serial]
fn test_missing_numbered_input_is_io_error() {
    let dir = TempDir::new().unwrap();
    env::set_var("TT_DATA_DIR", dir.path());

    let command = DelayCommand {
        io: numbered_io(42, OutputFormat::Csv),
    };
    let result = command.run();
    env::remove_var("TT_DATA_DIR");

    assert!(matches!(
        result,
        Err(timeout_tree_analysis::errors::AppError::Io(_))
    ));
}

#[test]
#[serial]
fn test_malformed_config_aborts_instead_of_using_defaults() {
    let dir = data_dir_with_input(9);
    env::set_var("TT_DATA_DIR", dir.path());
    env::set_var("TT_SWEEP__MAX_DEPTH", "deep");

    let command = DelayCommand {
        io: numbered_io(9, OutputFormat::Csv),
    };
    let result = command.run();
    env::remove_var("TT_DATA_DIR");
    env::remove_var("TT_SWEEP__MAX_DEPTH");

    assert!(matches!(
        result,
        Err(timeout_tree_analysis::errors::AppError::Config(_))
    ));
    assert!(!dir.path().join("out_tt_analysis09.csv").exists());
}
