//! The `rolewatch diff` command: compare two stored snapshots.

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::Args;

use rolewatch_core::ChangeType;
use rolewatch_snapshot::{diff_snapshots, FileSnapshotStore, Snapshot, SnapshotStore};

use crate::error::{CliError, CliResult};

/// Arguments for the diff command
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Capture date of the earlier snapshot (YYYY-MM-DD)
    pub from: NaiveDate,

    /// Capture date of the later snapshot (YYYY-MM-DD)
    pub to: NaiveDate,

    /// Directory holding stored snapshots
    #[arg(long, default_value = "snapshots", env = "ROLEWATCH_SNAPSHOTS_DIR")]
    pub snapshots_dir: PathBuf,
}

pub fn execute(args: DiffArgs) -> CliResult<()> {
    let store = FileSnapshotStore::open(&args.snapshots_dir)?;

    let from = load_exact(&store, args.from)?;
    let to = load_exact(&store, args.to)?;

    let changes = diff_snapshots(&to.records, &from.records, Utc::now());

    println!(
        "Changes between {} and {}: {}",
        args.from,
        args.to,
        changes.len()
    );
    for change_type in [ChangeType::New, ChangeType::Removed, ChangeType::Modified] {
        for change in changes.iter().filter(|c| c.change_type == change_type) {
            println!(
                "  [{}] {} / {} / {}: {} -> {}",
                change.change_type,
                change.tenant,
                change.principal_name,
                change.role_name,
                change.previous_value,
                change.current_value
            );
        }
    }

    Ok(())
}

/// Loads the snapshot captured on exactly `date`.
fn load_exact(store: &FileSnapshotStore, date: NaiveDate) -> CliResult<Snapshot> {
    // load_latest_prior is strictly-older, so probe from the next day.
    let next = date.succ_opt().ok_or(CliError::SnapshotNotFound(date))?;
    match store.load_latest_prior(next)? {
        Some(snapshot) if snapshot.captured_on == date => Ok(snapshot),
        _ => Err(CliError::SnapshotNotFound(date)),
    }
}
