//! game-metrics-plot - charts and summary statistics for per-turn game metrics
//!
//! Reads a CSV with one row per turn (Manhattan distance, shortest-path
//! distance and walls placed for two players), derives how far the shortest
//! path diverges from the Manhattan estimate, and renders four panels into a
//! single PNG.
//!
//! # Architecture
//!
//! - **Dataset**: CSV loading with columns resolved by header name
//! - **Metrics**: the per-turn table, derived divergence, summary statistics
//! - **Visualization**: panel model and the PNG figure renderer
//! - **UI**: optional terminal view of the same panels
//! - **Report**: the pipeline tying these together
//!
//! # Fonts
//!
//! Figure text is drawn with plotters' default TrueType support, which looks
//! up a `sans-serif` font on the system. Minimal containers may need one
//! installed (for example `fonts-dejavu-core`); without it the run fails
//! with a plot error before the image is written. Glyph rasterization can
//! differ slightly between machines with different fonts.
//!
//! # Example
//!
//! ```rust,no_run
//! use game_metrics_plot::{ReportConfig, ReportGenerator};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let generator = ReportGenerator::new(ReportConfig::default());
//!     let outcome = generator.run(Path::new("game_metrics.csv"))?;
//!     println!("{}", outcome.summary);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod output;
pub mod report;
pub mod ui;
pub mod visualization;

// Re-export commonly used types
pub use config::{DisplayMode, ReportConfig};
pub use error::{ReportError, Result};
pub use metrics::{MetricsRow, MetricsTable, Player, Summary};
pub use output::MetricsLog;
pub use report::{ReportGenerator, ReportOutcome};
pub use visualization::{FigurePlotter, Panel};
