//! The `rolewatch history` command: list stored snapshots.

use std::path::PathBuf;

use clap::Args;

use rolewatch_snapshot::{FileSnapshotStore, SnapshotStore};

use crate::error::CliResult;

/// Arguments for the history command
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Directory holding stored snapshots
    #[arg(long, default_value = "snapshots", env = "ROLEWATCH_SNAPSHOTS_DIR")]
    pub snapshots_dir: PathBuf,
}

pub fn execute(args: HistoryArgs) -> CliResult<()> {
    let store = FileSnapshotStore::open(&args.snapshots_dir)?;
    let dates = store.list()?;

    if dates.is_empty() {
        println!("No snapshots stored in {}", args.snapshots_dir.display());
        return Ok(());
    }

    println!("Stored snapshots ({}):", dates.len());
    for date in dates {
        println!("  {date}");
    }
    Ok(())
}
