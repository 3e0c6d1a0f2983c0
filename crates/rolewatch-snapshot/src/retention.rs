//! Retention policy for stored snapshots.
//!
//! Keeps only the most recent `keep_last` snapshot files, deleting the
//! oldest when the limit is exceeded. Deletion failures are warnings: a
//! lingering old snapshot never fails a run.

use std::fs;

use tracing::warn;

use crate::error::SnapshotResult;
use crate::store::{FileSnapshotStore, SnapshotStore};

/// Removes the oldest snapshots beyond `keep_last`.
///
/// A `keep_last` of zero disables retention entirely.
pub fn enforce_retention(store: &FileSnapshotStore, keep_last: usize) -> SnapshotResult<()> {
    if keep_last == 0 {
        return Ok(());
    }

    let dates = store.list()?;
    if dates.len() <= keep_last {
        return Ok(());
    }

    let to_remove = dates.len() - keep_last;
    for date in dates.iter().take(to_remove) {
        let path = store.snapshot_path(*date);
        if let Err(e) = fs::remove_file(&path) {
            warn!(
                path = %path.display(),
                error = %e,
                "Could not delete old snapshot file"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Snapshot;
    use chrono::NaiveDate;

    fn snapshot(day: u32) -> Snapshot {
        Snapshot {
            captured_on: NaiveDate::from_ymd_opt(2026, 8, day).unwrap(),
            records: Vec::new(),
        }
    }

    #[test]
    fn test_retention_no_action_under_limit() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::open_with_retention(dir.path(), 5).unwrap();

        for day in 1..=3 {
            store.save(&snapshot(day)).unwrap();
        }

        assert_eq!(store.list().unwrap().len(), 3);
    }

    #[test]
    fn test_retention_removes_oldest_beyond_limit() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::open_with_retention(dir.path(), 3).unwrap();

        for day in 1..=5 {
            store.save(&snapshot(day)).unwrap();
        }

        let remaining = store.list().unwrap();
        assert_eq!(remaining.len(), 3);
        assert_eq!(remaining[0], NaiveDate::from_ymd_opt(2026, 8, 3).unwrap());
        assert_eq!(remaining[2], NaiveDate::from_ymd_opt(2026, 8, 5).unwrap());
    }

    #[test]
    fn test_retention_zero_keeps_everything() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::open_with_retention(dir.path(), 0).unwrap();

        for day in 1..=5 {
            store.save(&snapshot(day)).unwrap();
        }

        assert_eq!(store.list().unwrap().len(), 5);
    }
}
