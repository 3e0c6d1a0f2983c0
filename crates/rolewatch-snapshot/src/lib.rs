//! Snapshot Persistence & Change Detection
//!
//! A snapshot is the full canonical assignment set captured at one run's
//! point in time, identified by its capture date. This crate persists
//! snapshots as JSON files, selects the most recent prior snapshot as the
//! diff baseline, and computes the typed change-set between two snapshots.

pub mod diff;
pub mod error;
pub mod retention;
pub mod store;

pub use diff::diff_snapshots;
pub use error::{SnapshotError, SnapshotResult};
pub use store::{FileSnapshotStore, Snapshot, SnapshotStore};
