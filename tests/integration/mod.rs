//! Integration Tests Module
//!
//! End-to-end tests that run complete analyses from input table to report.

pub mod numbered_files;
pub mod report_round_trip;
pub mod sample_tables;
