//! Snapshot storage on disk.
//!
//! One pretty-printed JSON file per capture date under the snapshots
//! directory. The baseline for a diff is the stored snapshot with the
//! greatest capture date strictly older than the current run's.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use rolewatch_core::AssignmentRecord;

use crate::error::{SnapshotError, SnapshotResult};
use crate::retention::enforce_retention;

/// Prefix of snapshot file names (`assignments_YYYY-MM-DD.json`).
pub const SNAPSHOT_PREFIX: &str = "assignments_";

/// Default number of snapshots kept on disk.
pub const DEFAULT_KEEP_LAST: usize = 30;

/// The full canonical assignment set of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Capture date identifying the snapshot.
    pub captured_on: NaiveDate,
    /// Canonical records of the run, all tenants concatenated.
    pub records: Vec<AssignmentRecord>,
}

/// Persistence contract for snapshots.
pub trait SnapshotStore {
    /// Loads the most recent snapshot captured strictly before `before`.
    ///
    /// Returns `None` when no prior snapshot exists (first run).
    fn load_latest_prior(&self, before: NaiveDate) -> SnapshotResult<Option<Snapshot>>;

    /// Persists a snapshot, replacing any snapshot with the same date.
    fn save(&self, snapshot: &Snapshot) -> SnapshotResult<PathBuf>;

    /// Lists stored capture dates, oldest first.
    fn list(&self) -> SnapshotResult<Vec<NaiveDate>>;
}

/// File-based [`SnapshotStore`].
pub struct FileSnapshotStore {
    dir: PathBuf,
    keep_last: usize,
}

impl FileSnapshotStore {
    /// Opens (creating if needed) a store rooted at `dir`.
    pub fn open(dir: &Path) -> SnapshotResult<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            keep_last: DEFAULT_KEEP_LAST,
        })
    }

    /// Opens a store with a custom retention count.
    pub fn open_with_retention(dir: &Path, keep_last: usize) -> SnapshotResult<Self> {
        let mut store = Self::open(dir)?;
        store.keep_last = keep_last;
        Ok(store)
    }

    /// Path of the snapshot file for a capture date.
    #[must_use]
    pub fn snapshot_path(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("{SNAPSHOT_PREFIX}{}.json", date.format("%Y-%m-%d")))
    }

    /// Parses a capture date out of a snapshot file name.
    fn parse_snapshot_date(file_name: &str) -> Option<NaiveDate> {
        let date_part = file_name
            .strip_prefix(SNAPSHOT_PREFIX)?
            .strip_suffix(".json")?;
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }

    fn load(&self, date: NaiveDate) -> SnapshotResult<Snapshot> {
        let path = self.snapshot_path(date);
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| SnapshotError::Corrupt {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load_latest_prior(&self, before: NaiveDate) -> SnapshotResult<Option<Snapshot>> {
        let latest_prior = self.list()?.into_iter().filter(|d| *d < before).next_back();

        match latest_prior {
            Some(date) => {
                debug!(baseline = %date, "Selected prior snapshot");
                Ok(Some(self.load(date)?))
            }
            None => Ok(None),
        }
    }

    fn save(&self, snapshot: &Snapshot) -> SnapshotResult<PathBuf> {
        let path = self.snapshot_path(snapshot.captured_on);
        let content = serde_json::to_string_pretty(snapshot)
            .map_err(|e| SnapshotError::Serialization(e.to_string()))?;
        fs::write(&path, content)?;

        info!(
            path = %path.display(),
            records = snapshot.records.len(),
            "Saved snapshot"
        );

        enforce_retention(self, self.keep_last)?;
        Ok(path)
    }

    fn list(&self) -> SnapshotResult<Vec<NaiveDate>> {
        let mut dates = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if let Some(date) = entry
                .file_name()
                .to_str()
                .and_then(Self::parse_snapshot_date)
            {
                dates.push(date);
            }
        }
        dates.sort_unstable();
        Ok(dates)
    }
}
