//! The `rolewatch run` command: one full audit run.

use std::path::PathBuf;

use chrono::Utc;
use clap::Args;
use tracing::info;

use rolewatch_engine::{execute_run, ReconcilerConfig, RunConfig};
use rolewatch_report::{csv, html, naming};
use rolewatch_snapshot::{diff_snapshots, FileSnapshotStore, Snapshot, SnapshotStore};

use crate::config::{load_tenant_feeds, RunSettings};
use crate::error::{CliError, CliResult};

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Tenants file: JSON array of per-tenant grant data
    #[arg(long, short = 't', env = "ROLEWATCH_TENANTS")]
    pub tenants: PathBuf,

    /// Directory receiving CSV and HTML exports
    #[arg(long, default_value = "reports", env = "ROLEWATCH_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Directory holding stored snapshots
    #[arg(long, default_value = "snapshots", env = "ROLEWATCH_SNAPSHOTS_DIR")]
    pub snapshots_dir: PathBuf,

    /// Maximum tenants processed concurrently
    #[arg(long, default_value = "4")]
    pub concurrency: usize,

    /// Snapshots kept on disk; 0 keeps everything
    #[arg(long, default_value = "30")]
    pub keep_last: usize,

    /// Days beyond which an active schedule counts as standing access
    #[arg(long, default_value = "365")]
    pub horizon_days: i64,

    /// Fail when no prior snapshot exists to diff against
    #[arg(long)]
    pub require_baseline: bool,
}

pub async fn execute(args: RunArgs) -> CliResult<()> {
    let settings = RunSettings::prepare(
        args.output_dir,
        args.snapshots_dir,
        args.concurrency,
        args.keep_last,
        args.horizon_days,
    )?;
    let feeds = load_tenant_feeds(&args.tenants)?;

    let now = Utc::now();
    let today = now.date_naive();

    let store = FileSnapshotStore::open_with_retention(&settings.snapshots_dir, settings.keep_last)?;

    let run_config = RunConfig {
        concurrency: settings.concurrency,
        reconciler: ReconcilerConfig {
            permanent_horizon_days: settings.horizon_days,
        },
    };
    let outcome = execute_run(feeds, &run_config, now).await;

    // First run establishes the baseline; it is not a change.
    let changes = match store.load_latest_prior(today)? {
        Some(prior) => {
            info!(baseline = %prior.captured_on, "Diffing against prior snapshot");
            diff_snapshots(&outcome.records, &prior.records, now)
        }
        None if args.require_baseline => return Err(CliError::MissingBaseline(today)),
        None => {
            info!("No prior snapshot, this run establishes the baseline");
            Vec::new()
        }
    };

    store.save(&Snapshot {
        captured_on: today,
        records: outcome.records.clone(),
    })?;

    csv::export_assignments(
        &settings.output_dir.join(naming::assignments_csv(today)),
        &outcome.records,
    )?;
    csv::export_changes(
        &settings.output_dir.join(naming::changes_csv(today)),
        &changes,
    )?;
    html::export_dashboard(
        &settings.output_dir.join(naming::dashboard_html(today)),
        today,
        &outcome.records,
        &changes,
    )?;

    // The final counts are reported even in partial-failure scenarios.
    println!("Audit run {} complete", outcome.run_id);
    println!(
        "  tenants: {} ok, {} failed (of {})",
        outcome.statistics.tenants_succeeded,
        outcome.statistics.tenants_failed,
        outcome.statistics.tenants_total
    );
    for tenant in outcome.tenants.iter().filter(|t| !t.succeeded()) {
        println!(
            "    {}: {}",
            tenant.tenant,
            tenant.error.as_deref().unwrap_or("unknown failure")
        );
    }
    println!("  assignments: {}", outcome.statistics.records_total);
    for (assignment_type, count) in &outcome.statistics.records_by_type {
        println!("    {assignment_type}: {count}");
    }
    println!("  changes: {}", changes.len());

    Ok(())
}
