//! Report formatting and output generation
//!
//! Provides formatting for analysis results via the [`ReportFormatter`] facade.
//! Supports sectioned CSV, annotated CSV, Console, and JSON output formats.

pub mod delay;
pub mod sweep;
pub mod tabular;
pub mod utils;

use crate::errors::AppResult;
use crate::types::{DelayReport, SweepReport};
use clap::ValueEnum;

/// Output format options for analysis reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Sectioned CSV mirroring the input layout
    #[default]
    Csv,
    /// Sectioned CSV with a title and column descriptions, for spreadsheets
    Annotated,
    /// Human-readable console table
    Console,
    /// JSON format for programmatic use
    Json,
}

/// Facade for all report formatting operations
pub struct ReportFormatter;

impl ReportFormatter {
    /// Format a sweep report; `table` writes every evaluated shape
    pub fn format_sweep_report(
        r: &SweepReport,
        f: &OutputFormat,
        table: bool,
    ) -> AppResult<String> {
        sweep::format_sweep_report(r, f, table)
    }

    pub fn format_delay_report(r: &DelayReport, f: &OutputFormat) -> AppResult<String> {
        delay::format_delay_report(r, f)
    }
}
