//! Timeout-tree analysis
//!
//! The analysis module is organised around the `AnalysisEngine`, which owns
//! one validated input table and runs the analyses over its scenario rows:
//!
//! - **Scalability sweep** - Per-shape capital cost against on-chain unwind
//!   cost, and the breakeven shape for each scenario
//! - **Security delay** - Block-space fraction that minimises the expected
//!   per-leaf cost, with the resulting delay and overheads
//! - **Report Generation** - Sectioned CSV, annotated CSV, console and JSON
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use timeout_tree_analysis::analysis::{AnalysisEngine, OutputFormat, ReportFormatter};
//! use timeout_tree_analysis::errors::AppResult;
//! use timeout_tree_analysis::processor::IngestionOptions;
//!
//! fn example() -> AppResult<()> {
//!     let engine = AnalysisEngine::from_path(
//!         Path::new("data/in_tt_analysis01.csv"),
//!         &IngestionOptions::default(),
//!     )?;
//!
//!     let sweep = engine.run_sweep()?;
//!     println!("{}", ReportFormatter::format_sweep_report(&sweep, &OutputFormat::Csv, false)?);
//!
//!     let delay = engine.run_security_delay()?;
//!     println!("{}", ReportFormatter::format_delay_report(&delay, &OutputFormat::Annotated)?);
//!     Ok(())
//! }
//! ```

pub mod cost_model;
pub mod feerate;
pub mod reports;
pub mod security_delay;
pub mod sweep;

pub use cost_model::CostModel;
pub use feerate::{FeerateCurve, BLOCKSIZE_VBYTES};
pub use reports::{OutputFormat, ReportFormatter};
pub use security_delay::analyse_security_delay;
pub use sweep::{candidate_shapes, find_breakeven, sweep_scenario};

use crate::errors::{AppError, AppResult};
use crate::processor::{CsvProcessor, IngestionOptions};
use crate::types::statistics::StatisticsCollector;
use crate::types::{
    DelayReport, InputSet, ProcessingStats, RejectedRow, Scenario, ScenarioDelay, SweepReport,
};
use chrono::Utc;
use std::path::Path;
use tracing::{info, warn};

/// Main analysis engine over one input table
pub struct AnalysisEngine {
    input: InputSet,
    skip_invalid_rows: bool,
}

impl AnalysisEngine {
    /// Wrap an already ingested input table
    pub fn new(input: InputSet, skip_invalid_rows: bool) -> Self {
        Self {
            input,
            skip_invalid_rows,
        }
    }

    /// Read, validate and wrap the input table at `path`
    pub fn from_path(path: &Path, options: &IngestionOptions) -> AppResult<Self> {
        let input = CsvProcessor::new(options.clone()).read_path(path)?;
        Ok(Self::new(input, options.skip_invalid_rows))
    }

    pub fn input(&self) -> &InputSet {
        &self.input
    }

    /// Sweep every scenario over the configured tree shapes
    pub fn run_sweep(&self) -> AppResult<SweepReport> {
        let mut stats = self.initial_stats();
        let mut rejected = self.input.rejected.clone();
        let mut scenarios = Vec::with_capacity(self.input.scenarios.len());

        for scenario in &self.input.scenarios {
            match sweep_scenario(&self.input.fixed, scenario) {
                Ok(sweep) => {
                    stats.scenarios_processed += 1;
                    stats.shapes_evaluated += sweep.results.len();
                    stats.viable_shapes += sweep.results.iter().filter(|r| r.viable).count();
                    scenarios.push(sweep);
                }
                Err(e) => self.reject(scenario, e, &mut rejected, &mut stats)?,
            }
        }

        stats.finish();
        info!("Sweep complete: {}", stats.summary());
        Ok(SweepReport {
            generated_at: Utc::now().to_rfc3339(),
            fixed_section: self.input.fixed_section.clone(),
            scenario_headers: self.input.scenario_headers.clone(),
            scenarios,
            rejected,
            stats,
        })
    }

    /// Optimise the security delay for every scenario
    pub fn run_security_delay(&self) -> AppResult<DelayReport> {
        let mut stats = self.initial_stats();
        let mut rejected = self.input.rejected.clone();
        let mut scenarios = Vec::with_capacity(self.input.scenarios.len());

        for scenario in &self.input.scenarios {
            match analyse_security_delay(&self.input.fixed, scenario) {
                Ok(result) => {
                    stats.scenarios_processed += 1;
                    scenarios.push(ScenarioDelay {
                        line: scenario.line,
                        raw: scenario.raw.clone(),
                        result,
                    });
                }
                Err(e) => self.reject(scenario, e, &mut rejected, &mut stats)?,
            }
        }

        stats.finish();
        info!("Security-delay analysis complete: {}", stats.summary());
        Ok(DelayReport {
            generated_at: Utc::now().to_rfc3339(),
            fixed_section: self.input.fixed_section.clone(),
            scenario_headers: self.input.scenario_headers.clone(),
            scenarios,
            rejected,
            stats,
        })
    }

    fn initial_stats(&self) -> ProcessingStats {
        ProcessingStats {
            scenarios_read: self.input.scenarios.len() + self.input.rejected.len(),
            scenarios_rejected: self.input.rejected.len(),
            ..Default::default()
        }
    }

    /// Apply the skip policy to a scenario that failed during analysis
    fn reject(
        &self,
        scenario: &Scenario,
        error: AppError,
        rejected: &mut Vec<RejectedRow>,
        stats: &mut ProcessingStats,
    ) -> AppResult<()> {
        if !(self.skip_invalid_rows && error.is_record_error()) {
            return Err(error);
        }
        warn!("Skipping scenario at line {}: {}", scenario.line, error);
        stats.scenarios_rejected += 1;
        rejected.push(RejectedRow {
            line: scenario.line,
            reason: error.to_string(),
        });
        rejected.sort_by_key(|r| r.line);
        Ok(())
    }
}
