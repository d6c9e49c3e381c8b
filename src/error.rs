//! Error types for game-metrics-plot

use std::path::PathBuf;
use thiserror::Error;

/// Report error type
#[derive(Error, Debug)]
pub enum ReportError {
    /// File could not be opened, read or written
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed delimited input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("missing column '{column}' in {}", .path.display())]
    MissingColumn { column: String, path: PathBuf },

    /// A cell could not be parsed as the column's type
    #[error("invalid value '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },

    /// Header present but no data rows
    #[error("no data rows in {}", .path.display())]
    EmptyTable { path: PathBuf },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Drawing backend failure
    #[error("plot error: {0}")]
    Plot(String),

    /// Interactive display failure
    #[error("display error: {0}")]
    Display(String),
}

impl ReportError {
    /// Wrap an IO error with the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ReportError>;
