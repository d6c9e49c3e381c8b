//! CLI argument parsing and command handling

use crate::config::{ReportConfig, DEFAULT_INPUT};
use crate::report::{ReportGenerator, ReportOutcome};
use crate::ui;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Plot per-turn game metrics and print summary statistics
///
/// Writes a 2x2 figure (distances per player, divergence, walls placed) and
/// prints max/average divergence and final wall counts.
#[derive(Parser, Debug)]
#[command(name = "game-metrics-plot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Metrics CSV with turn, pN_manhattan, pN_shortest_path and pN_walls_placed columns
    #[arg(default_value = DEFAULT_INPUT)]
    pub input: PathBuf,
}

impl Cli {
    /// Run the report based on CLI arguments
    pub fn run(&self) -> Result<()> {
        let config = ReportConfig::from_env().context("Invalid configuration")?;
        tracing::info!("Input: {}", self.input.display());
        tracing::info!("Output: {}", config.output_path.display());

        let generator = ReportGenerator::new(config);
        let outcome = generator
            .run(&self.input)
            .with_context(|| format!("Failed to build report from: {}", self.input.display()))?;

        println!("Plot saved to {}", outcome.output_path.display());

        generator.display(&outcome, ui::is_interactive());

        self.print_summary(&outcome);
        Ok(())
    }

    fn print_summary(&self, outcome: &ReportOutcome) {
        println!("\n{}", outcome.summary);
    }
}
