pub mod delay;
pub mod sweep;

use crate::analysis::OutputFormat;
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use clap::Args;
use std::path::{Path, PathBuf};

/// Input/output options shared by the analysis commands
#[derive(Args, Debug, Clone)]
pub struct IoArgs {
    /// Input table (sectioned CSV)
    #[arg(long, short = 'i', conflicts_with = "number")]
    pub input: Option<PathBuf>,

    /// File number NN: reads in_tt_analysisNN.csv from the data directory and
    /// writes the matching output file there
    #[arg(long, short = 'n')]
    pub number: Option<u32>,

    /// Output path (defaults to stdout, or the numbered file with --number)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Report and skip invalid scenario rows instead of aborting
    #[arg(long)]
    pub skip_invalid: bool,
}

impl IoArgs {
    /// Resolve the input path and optional output path.
    ///
    /// `output_stem` names numbered outputs, e.g. `out_tt_analysis` gives
    /// `out_tt_analysis01.csv` for `--number 1`.
    pub fn resolve(
        &self,
        config: &AppConfig,
        output_stem: &str,
    ) -> AppResult<(PathBuf, Option<PathBuf>)> {
        match (&self.input, self.number) {
            (Some(input), _) => Ok((input.clone(), self.output.clone())),
            (None, Some(number)) => {
                let data_dir = &config.paths.data_dir;
                let input = numbered_path(data_dir, "in_tt_analysis", number);
                let output = self
                    .output
                    .clone()
                    .unwrap_or_else(|| numbered_path(data_dir, output_stem, number));
                Ok((input, Some(output)))
            }
            (None, None) => Err(AppError::Config(
                "No input table provided. Use --input PATH or --number NN".to_string(),
            )),
        }
    }

    /// Command-line flag or the configured default
    pub fn skip_invalid_rows(&self, config: &AppConfig) -> bool {
        self.skip_invalid || config.processing.skip_invalid_rows
    }
}

/// `<dir>/<stem>NN.csv`, numbers zero-padded to two digits
pub fn numbered_path(dir: &Path, stem: &str, number: u32) -> PathBuf {
    dir.join(format!("{}{:02}.csv", stem, number))
}

/// Write output to file with safe directory creation
pub fn write_output_to_file(path: &Path, content: &str, description: &str) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    println!("{} written to: {}", description, path.display());
    Ok(())
}

/// Write to the output file when one is given, otherwise to stdout
pub fn emit(output: Option<&Path>, content: &str, description: &str) -> AppResult<()> {
    match output {
        Some(path) => write_output_to_file(path, content, description),
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}
