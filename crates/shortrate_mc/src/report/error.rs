//! Report writing errors.

use thiserror::Error;

/// Error writing a CSV table or JSON summary.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Failure of the underlying sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Tables that must share a grid do not.
    #[error("Grid mismatch: {0}")]
    GridMismatch(String),
}
