//! CLI error types.
//!
//! Everything here is run-fatal: component-local failures (a skipped feed
//! row, an unreadable tenant) degrade results inside the engine and never
//! surface as a `CliError`. Exit code is 0 on success, including partial
//! tenant failure, and 1 for any error below.

use thiserror::Error;

/// Result type alias using `CliError`.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot prepare output location: {0}")]
    Output(String),

    #[error("Snapshot store error: {0}")]
    Snapshot(#[from] rolewatch_snapshot::SnapshotError),

    #[error("Export error: {0}")]
    Report(#[from] rolewatch_report::ReportError),

    #[error("No baseline snapshot found before {0}, but one was required")]
    MissingBaseline(chrono::NaiveDate),

    #[error("No snapshot stored for {0}")]
    SnapshotNotFound(chrono::NaiveDate),
}
