//! Audit run configuration.
//!
//! Fail-fast: the tenants file must exist and parse, and directories must
//! be creatable, before any tenant work starts.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rolewatch_feed::{GrantFeed, InMemoryFeed, TenantData};

use crate::error::{CliError, CliResult};

/// Validated settings for one audit run.
#[derive(Debug)]
pub struct RunSettings {
    /// Directory receiving CSV and HTML exports.
    pub output_dir: PathBuf,
    /// Directory holding stored snapshots.
    pub snapshots_dir: PathBuf,
    /// Maximum tenants reconciled concurrently.
    pub concurrency: usize,
    /// Snapshots kept on disk (0 disables retention).
    pub keep_last: usize,
    /// Standing-grant horizon in days.
    pub horizon_days: i64,
}

impl RunSettings {
    /// Validates raw flag values into settings, creating the output and
    /// snapshot directories. Failure here is run-fatal.
    pub fn prepare(
        output_dir: PathBuf,
        snapshots_dir: PathBuf,
        concurrency: usize,
        keep_last: usize,
        horizon_days: i64,
    ) -> CliResult<Self> {
        if concurrency == 0 {
            return Err(CliError::Config(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if horizon_days <= 0 {
            return Err(CliError::Config(
                "horizon-days must be positive".to_string(),
            ));
        }

        fs::create_dir_all(&output_dir)
            .map_err(|e| CliError::Output(format!("{}: {e}", output_dir.display())))?;
        fs::create_dir_all(&snapshots_dir)
            .map_err(|e| CliError::Output(format!("{}: {e}", snapshots_dir.display())))?;

        Ok(Self {
            output_dir,
            snapshots_dir,
            concurrency,
            keep_last,
            horizon_days,
        })
    }
}

/// Loads the tenants file: a JSON array of per-tenant grant data.
pub fn load_tenant_feeds(path: &Path) -> CliResult<Vec<Arc<dyn GrantFeed>>> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::Config(format!("cannot read tenants file {}: {e}", path.display())))?;

    let tenants: Vec<TenantData> = serde_json::from_str(&content)
        .map_err(|e| CliError::Config(format!("invalid tenants file {}: {e}", path.display())))?;

    if tenants.is_empty() {
        return Err(CliError::Config(format!(
            "tenants file {} defines no tenants",
            path.display()
        )));
    }

    Ok(tenants
        .into_iter()
        .map(|data| Arc::new(InMemoryFeed::new(data)) as Arc<dyn GrantFeed>)
        .collect())
}
