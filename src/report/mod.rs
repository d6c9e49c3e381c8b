//! Report pipeline
//!
//! Load -> Derive -> Summarize -> Plot -> Persist, then an optional
//! interactive display. The summary is computed before the image is written
//! so a run either fails before touching the output file or produces both.

use crate::config::ReportConfig;
use crate::dataset;
use crate::error::{ReportError, Result};
use crate::metrics::{MetricsTable, Summary};
use crate::ui;
use crate::visualization::{build_panels, FigurePlotter, Panel};
use std::path::{Path, PathBuf};

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    /// Loaded table with divergence columns derived
    pub table: MetricsTable,
    pub panels: [Panel; 4],
    pub summary: Summary,
    /// Where the figure was written
    pub output_path: PathBuf,
}

/// Runs the report pipeline for one input file
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Load, derive, summarize and write the figure
    pub fn run(&self, input: &Path) -> Result<ReportOutcome> {
        self.config.validate()?;

        let mut table = dataset::load(input)?;
        table.derive_divergence();

        let summary = table.summarize().ok_or_else(|| ReportError::EmptyTable {
            path: input.to_path_buf(),
        })?;

        let panels = build_panels(&table);
        FigurePlotter::plot(&panels, &self.config)?;

        Ok(ReportOutcome {
            table,
            panels,
            summary,
            output_path: self.config.output_path.clone(),
        })
    }

    /// Open the interactive view if the display mode allows it
    ///
    /// Failures are logged, not returned. Returns whether the view was shown.
    pub fn display(&self, outcome: &ReportOutcome, interactive: bool) -> bool {
        if !ui::should_display(self.config.display, interactive) {
            tracing::info!("Display disabled or no terminal attached, skipping");
            return false;
        }

        match ui::run_viewer(&outcome.panels, &outcome.output_path) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Could not display figure: {}", e);
                false
            }
        }
    }
}
