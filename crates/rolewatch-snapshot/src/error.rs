//! Error types for snapshot storage.

use thiserror::Error;

/// Result type alias using `SnapshotError`.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Errors that can occur when persisting or loading snapshots.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored snapshot could not be parsed.
    #[error("Snapshot file corrupted: {path}: {message}")]
    Corrupt {
        /// Offending file.
        path: String,
        /// Parse failure description.
        message: String,
    },

    /// Serialization of a snapshot failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}
