//! Error types for the reconciliation engine.

use rolewatch_feed::FeedError;
use thiserror::Error;

/// Result type alias using `EngineError`.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur during reconciliation.
///
/// Only failures that make a whole tenant unreadable surface here; lookup
/// failures scoped to one raw entry are logged and degrade the result set
/// instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A tenant's feed could not be read.
    #[error("Feed error for tenant {tenant}: {source}")]
    Feed {
        /// Tenant whose feed failed.
        tenant: String,
        /// Underlying feed failure.
        #[source]
        source: FeedError,
    },
}

impl EngineError {
    /// Wraps a feed error with its tenant.
    #[must_use]
    pub fn feed(tenant: impl Into<String>, source: FeedError) -> Self {
        EngineError::Feed {
            tenant: tenant.into(),
            source,
        }
    }
}
