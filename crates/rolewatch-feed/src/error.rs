//! Error types for grant feed operations.

use thiserror::Error;

/// Result type alias using `FeedError`.
pub type FeedResult<T> = Result<T, FeedError>;

/// Errors that can occur when reading from a grant feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Authentication against the tenant's provider failed.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Transport-level failure talking to the provider.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A referenced object does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The credentials lack permission for the requested read.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The provider returned a record the feed could not interpret.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
}

impl FeedError {
    /// True for errors that make the whole tenant unreadable, as opposed to
    /// failures scoped to a single lookup.
    #[must_use]
    pub fn is_tenant_fatal(&self) -> bool {
        matches!(self, FeedError::Auth(_) | FeedError::Transport(_))
    }
}
