use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// Timeout-Tree Scalability Analyser
#[derive(Parser)]
#[command(name = "tt-analysis")]
#[command(about = "Timeout-tree scalability and security-delay calculator")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Sweep tree shapes per scenario and report the capital/unwind breakeven
    Sweep(commands::sweep::SweepCommand),
    /// Optimise the block-space fraction for leaves and report the security delay
    Delay(commands::delay::DelayCommand),
}

pub fn run() -> AppResult<()> {
    // Initialise tracing subscriber to capture info!() macros
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sweep(command) => command.run(),
        Commands::Delay(command) => command.run(),
    }
}
