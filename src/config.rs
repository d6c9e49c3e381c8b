//! Report configuration types

use crate::error::{ReportError, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default input file read when no path is given
pub const DEFAULT_INPUT: &str = "game_metrics.csv";

/// Default output image
pub const DEFAULT_OUTPUT: &str = "metrics_plot.png";

/// Environment variable overriding the output image path
pub const OUTPUT_ENV: &str = "METRICS_PLOT_OUTPUT";

/// Environment variable selecting the display mode
pub const DISPLAY_ENV: &str = "METRICS_PLOT_DISPLAY";

/// When to open the interactive view after the image is saved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Only when stdin and stdout are both terminals
    #[default]
    Auto,
    Always,
    Never,
}

impl FromStr for DisplayMode {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            other => Err(ReportError::Config(format!(
                "invalid display mode '{}', expected auto, always or never",
                other
            ))),
        }
    }
}

/// Report configuration
///
/// Controls where the figure is written, at what resolution, and whether
/// the interactive view is opened afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Path of the rendered image
    pub output_path: PathBuf,

    /// Dots per inch used to turn the figure size into pixels
    pub dpi: u32,

    /// Figure width and height in inches
    pub figure_size_in: (f64, f64),

    /// Interactive display policy
    pub display: DisplayMode,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            dpi: 150,
            figure_size_in: (14.0, 10.0),
            display: DisplayMode::Auto,
        }
    }
}

impl ReportConfig {
    /// Build the default config, then apply environment overrides
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ReportConfig::from_env`] with an injectable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(OUTPUT_ENV) {
            config = config.with_output_path(path);
        }
        if let Some(mode) = lookup(DISPLAY_ENV) {
            config = config.with_display(mode.parse()?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the output image path
    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output_path = path.as_ref().to_path_buf();
        self
    }

    /// Set the resolution
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Set the display mode
    pub fn with_display(mut self, display: DisplayMode) -> Self {
        self.display = display;
        self
    }

    /// Figure size in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        let (w, h) = self.figure_size_in;
        (
            (w * self.dpi as f64).round() as u32,
            (h * self.dpi as f64).round() as u32,
        )
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(ReportError::Config("dpi must be at least 1".into()));
        }

        let (w, h) = self.figure_size_in;
        if !(w > 0.0 && h > 0.0) {
            return Err(ReportError::Config(format!(
                "figure size must be positive, got {}x{} in",
                w, h
            )));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(ReportError::Config("output path must not be empty".into()));
        }

        Ok(())
    }
}
