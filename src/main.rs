//! game-metrics-plot CLI
//!
//! Renders per-turn game metrics into `metrics_plot.png` and prints a summary.

use anyhow::Result;
use clap::Parser;
use game_metrics_plot::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    cli.run()?;

    Ok(())
}
