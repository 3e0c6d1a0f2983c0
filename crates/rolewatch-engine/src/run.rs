//! Multi-tenant run orchestration.
//!
//! Per-tenant reconciliation is embarrassingly parallel: each tenant's
//! worker consumes only that tenant's feeds and produces an isolated record
//! set. A bounded semaphore caps concurrent tenants; the run-wide record
//! list is assembled only after every worker has finished (join barrier).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, instrument};
use uuid::Uuid;

use rolewatch_core::AssignmentRecord;
use rolewatch_feed::GrantFeed;

use crate::reconcile::{AssignmentReconciler, ReconcilerConfig};

/// Configuration for a multi-tenant audit run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Maximum tenants reconciled concurrently.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Classification configuration passed to every tenant's reconciler.
    #[serde(default)]
    pub reconciler: ReconcilerConfig,
}

fn default_concurrency() -> usize {
    4
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            reconciler: ReconcilerConfig::default(),
        }
    }
}

/// Outcome of one tenant's reconciliation within a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantStatus {
    /// Tenant identifier.
    pub tenant: String,
    /// Records the tenant contributed.
    pub records: usize,
    /// Failure description when the tenant contributed nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TenantStatus {
    /// True when the tenant reconciled successfully.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate statistics for a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Tenants the run attempted.
    pub tenants_total: usize,
    /// Tenants that reconciled successfully.
    pub tenants_succeeded: usize,
    /// Tenants that contributed zero records due to a fatal feed error.
    pub tenants_failed: usize,
    /// Total canonical records produced.
    pub records_total: usize,
    /// Record counts broken down by assignment type.
    pub records_by_type: HashMap<String, usize>,
    /// Wall-clock duration of the run in milliseconds.
    pub duration_ms: u64,
}

/// Result of a full multi-tenant run.
#[derive(Debug)]
pub struct RunOutcome {
    /// Unique run identifier.
    pub run_id: Uuid,
    /// Capture instant shared by every record of the run.
    pub captured_at: DateTime<Utc>,
    /// Run-wide canonical record set (all tenants concatenated).
    pub records: Vec<AssignmentRecord>,
    /// Per-tenant outcomes, sorted by tenant.
    pub tenants: Vec<TenantStatus>,
    /// Aggregate statistics.
    pub statistics: RunStatistics,
}

/// Reconciles every tenant and merges the results into one run.
///
/// A tenant whose feed fails contributes zero records and a failure status;
/// it never aborts sibling tenants. The returned record list is complete
/// only with respect to the tenants that succeeded.
#[instrument(skip(feeds, config), fields(tenants = feeds.len()))]
pub async fn execute_run(
    feeds: Vec<Arc<dyn GrantFeed>>,
    config: &RunConfig,
    now: DateTime<Utc>,
) -> RunOutcome {
    let run_id = Uuid::new_v4();
    let started = Instant::now();
    let tenants_total = feeds.len();

    info!(
        run_id = %run_id,
        tenants = tenants_total,
        concurrency = config.concurrency,
        "Starting audit run"
    );

    let semaphore = Arc::new(Semaphore::new(config.concurrency.max(1)));
    let mut workers: JoinSet<TenantOutput> = JoinSet::new();

    for feed in feeds {
        let semaphore = Arc::clone(&semaphore);
        let reconciler_config = config.reconciler.clone();
        workers.spawn(async move {
            let tenant = feed.tenant().to_string();
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    return TenantOutput {
                        tenant,
                        result: Err("worker pool closed".to_string()),
                    }
                }
            };

            let reconciler = AssignmentReconciler::with_config(feed.as_ref(), reconciler_config);
            match reconciler.reconcile(now).await {
                Ok(records) => TenantOutput {
                    tenant,
                    result: Ok(records),
                },
                Err(err) => TenantOutput {
                    tenant,
                    result: Err(err.to_string()),
                },
            }
        });
    }

    let mut records = Vec::new();
    let mut tenants = Vec::with_capacity(tenants_total);

    // Join barrier: the run-wide set exists only after every tenant task
    // has completed.
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok(output) => match output.result {
                Ok(tenant_records) => {
                    tenants.push(TenantStatus {
                        tenant: output.tenant,
                        records: tenant_records.len(),
                        error: None,
                    });
                    records.extend(tenant_records);
                }
                Err(message) => {
                    error!(tenant = %output.tenant, error = %message, "Tenant reconciliation failed");
                    tenants.push(TenantStatus {
                        tenant: output.tenant,
                        records: 0,
                        error: Some(message),
                    });
                }
            },
            Err(join_err) => {
                error!(error = %join_err, "Tenant worker task failed");
                tenants.push(TenantStatus {
                    tenant: "<unknown>".to_string(),
                    records: 0,
                    error: Some(join_err.to_string()),
                });
            }
        }
    }

    tenants.sort_by(|a, b| a.tenant.cmp(&b.tenant));

    let mut records_by_type: HashMap<String, usize> = HashMap::new();
    for record in &records {
        *records_by_type
            .entry(record.assignment_type.to_string())
            .or_insert(0) += 1;
    }

    let statistics = RunStatistics {
        tenants_total,
        tenants_succeeded: tenants.iter().filter(|t| t.succeeded()).count(),
        tenants_failed: tenants.iter().filter(|t| !t.succeeded()).count(),
        records_total: records.len(),
        records_by_type,
        duration_ms: started.elapsed().as_millis() as u64,
    };

    info!(
        run_id = %run_id,
        records = statistics.records_total,
        tenants_ok = statistics.tenants_succeeded,
        tenants_failed = statistics.tenants_failed,
        "Audit run complete"
    );

    RunOutcome {
        run_id,
        captured_at: now,
        records,
        tenants,
        statistics,
    }
}

struct TenantOutput {
    tenant: String,
    result: Result<Vec<AssignmentRecord>, String>,
}
