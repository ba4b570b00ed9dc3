use super::{emit, IoArgs};
use crate::analysis::{AnalysisEngine, ReportFormatter};
use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::processor::IngestionOptions;
use crate::types::statistics::StatisticsCollector;
use crate::types::TreeDefaults;
use clap::Args;
use tracing::info;

/// Numbered security-delay outputs are written as `out_tt_analysisNN.csv`
pub const DELAY_OUTPUT_STEM: &str = "out_tt_analysis";

#[derive(Args, Debug)]
pub struct DelayCommand {
    #[command(flatten)]
    pub io: IoArgs,
}

impl DelayCommand {
    pub fn run(&self) -> AppResult<()> {
        info!("=== Timeout-Tree Analysis - Security Delay ===");

        let app_config = AppConfig::load()?;
        let (input, output) = self.io.resolve(&app_config, DELAY_OUTPUT_STEM)?;
        let options = IngestionOptions {
            tree_defaults: TreeDefaults::from(&app_config.sweep),
            skip_invalid_rows: self.io.skip_invalid_rows(&app_config),
        };

        let engine = AnalysisEngine::from_path(&input, &options)?;
        let report = engine.run_security_delay()?;
        let content = ReportFormatter::format_delay_report(&report, &self.io.format)?;
        emit(output.as_deref(), &content, "Security-delay report")?;

        if output.is_some() {
            println!("{}", report.stats.summary());
        }
        for rejected in &report.rejected {
            eprintln!("Skipped line {}: {}", rejected.line, rejected.reason);
        }
        Ok(())
    }
}
