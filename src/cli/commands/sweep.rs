use super::{emit, IoArgs};
use crate::analysis::{AnalysisEngine, ReportFormatter};
use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::processor::IngestionOptions;
use crate::types::statistics::StatisticsCollector;
use crate::types::{TreeDefaults, MAX_TREE_DEPTH};
use clap::Args;
use tracing::info;

/// Numbered sweep outputs are written as `out_tt_sweepNN.csv`
pub const SWEEP_OUTPUT_STEM: &str = "out_tt_sweep";

#[derive(Args, Debug)]
pub struct SweepCommand {
    #[command(flatten)]
    pub io: IoArgs,

    /// Write every evaluated shape instead of one breakeven row per scenario
    #[arg(long)]
    pub table: bool,

    /// Branching factor to sweep; repeat for several (overrides config.toml)
    #[arg(long = "branching-factor", short = 'b')]
    pub branching_factors: Vec<u64>,

    /// Deepest tree to sweep (overrides config.toml)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_TREE_DEPTH)))]
    pub max_depth: Option<u32>,

    /// Timeout window per tree level, in blocks (overrides config.toml)
    #[arg(long)]
    pub level_timeout: Option<u64>,

    /// Size of one tree-node transaction, in vbytes (overrides config.toml)
    #[arg(long)]
    pub node_vbytes: Option<u64>,
}

impl SweepCommand {
    /// Tree settings for input files without sweep columns; flags beat config
    pub fn tree_defaults(&self, config: &AppConfig) -> TreeDefaults {
        let mut defaults = TreeDefaults::from(&config.sweep);
        if !self.branching_factors.is_empty() {
            defaults.branching_factors = self.branching_factors.clone();
        }
        if let Some(max_depth) = self.max_depth {
            defaults.max_depth = max_depth;
        }
        if let Some(level_timeout) = self.level_timeout {
            defaults.level_timeout_blocks = level_timeout;
        }
        if let Some(node_vbytes) = self.node_vbytes {
            defaults.node_vbytes = node_vbytes;
        }
        defaults
    }

    pub fn run(&self) -> AppResult<()> {
        info!("=== Timeout-Tree Analysis - Scalability Sweep ===");

        let app_config = AppConfig::load()?;
        let (input, output) = self.io.resolve(&app_config, SWEEP_OUTPUT_STEM)?;
        let options = IngestionOptions {
            tree_defaults: self.tree_defaults(&app_config),
            skip_invalid_rows: self.io.skip_invalid_rows(&app_config),
        };

        let engine = AnalysisEngine::from_path(&input, &options)?;
        let report = engine.run_sweep()?;
        let content = ReportFormatter::format_sweep_report(&report, &self.io.format, self.table)?;
        emit(output.as_deref(), &content, "Sweep report")?;

        if output.is_some() {
            println!("{}", report.stats.summary());
        }
        for rejected in &report.rejected {
            eprintln!("Skipped line {}: {}", rejected.line, rejected.reason);
        }
        Ok(())
    }
}
