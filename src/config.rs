use crate::types::{TreeDefaults, MAX_TREE_DEPTH};
use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub sweep: SweepConfig,
    pub processing: ProcessingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding `in_tt_analysisNN.csv` / `out_tt_*NN.csv` files
    pub data_dir: PathBuf,
}

/// Tree-shape sweep settings for input files that leave them out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    pub node_vbytes: u64,
    pub branching_factors: Vec<u64>,
    pub max_depth: u32,
    pub level_timeout_blocks: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        let defaults = TreeDefaults::default();
        Self {
            node_vbytes: defaults.node_vbytes,
            branching_factors: defaults.branching_factors,
            max_depth: defaults.max_depth,
            level_timeout_blocks: defaults.level_timeout_blocks,
        }
    }
}

impl From<&SweepConfig> for TreeDefaults {
    fn from(config: &SweepConfig) -> Self {
        TreeDefaults {
            node_vbytes: config.node_vbytes,
            branching_factors: config.branching_factors.clone(),
            max_depth: config.max_depth,
            level_timeout_blocks: config.level_timeout_blocks,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Skip invalid scenario rows (reported, never emitted) instead of aborting
    pub skip_invalid_rows: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig {
                data_dir: PathBuf::from("./data"),
            },
            sweep: SweepConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();
        let branching_factors: Vec<i64> = defaults
            .sweep
            .branching_factors
            .iter()
            .map(|&b| b as i64)
            .collect();

        let config = Config::builder()
            .set_default(
                "paths.data_dir",
                defaults.paths.data_dir.to_string_lossy().to_string(),
            )?
            .set_default("sweep.node_vbytes", defaults.sweep.node_vbytes)?
            .set_default("sweep.branching_factors", branching_factors)?
            .set_default("sweep.max_depth", defaults.sweep.max_depth as i64)?
            .set_default(
                "sweep.level_timeout_blocks",
                defaults.sweep.level_timeout_blocks,
            )?
            .set_default(
                "processing.skip_invalid_rows",
                defaults.processing.skip_invalid_rows,
            )?
            // Load from config.toml if it exists
            .add_source(File::with_name("config").required(false))
            // TT_SWEEP__MAX_DEPTH style variables override nested keys
            .add_source(
                config::Environment::with_prefix("TT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        if let Ok(data_dir) = env::var("TT_DATA_DIR") {
            app_config.paths.data_dir = PathBuf::from(data_dir);
        }

        if app_config.sweep.branching_factors.is_empty() {
            return Err(ConfigError::Message(
                "sweep.branching_factors must list at least one branching factor".to_string(),
            ));
        }

        if app_config.sweep.max_depth > MAX_TREE_DEPTH {
            return Err(ConfigError::Message(format!(
                "sweep.max_depth {} exceeds the deepest sweepable tree ({})",
                app_config.sweep.max_depth,
                MAX_TREE_DEPTH
            )));
        }

        Ok(app_config)
    }
}
