//! Error types for result export.

use thiserror::Error;

/// Result type alias using `ReportError`.
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors that can occur while exporting audit results.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
