//! Assignment reconciliation.
//!
//! Merges the three overlapping grant feeds of one tenant into the
//! canonical record set, applying the classification rules that separate
//! time-boxed access from standing access.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use rolewatch_core::{
    AssignmentRecord, AssignmentType, Principal, TimeBoundary, DIRECT_ASSIGNMENT,
};
use rolewatch_feed::{GrantFeed, RoleDefinition};

use crate::error::{EngineError, EngineResult};
use crate::expand::GroupExpander;
use crate::resolver::PrincipalResolver;

/// Configuration for assignment classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcilerConfig {
    /// Horizon beyond which an active schedule's expiration marks the grant
    /// as de-facto standing. An end time *strictly* later than
    /// `now + permanent_horizon_days` classifies as Permanent.
    #[serde(default = "default_permanent_horizon_days")]
    pub permanent_horizon_days: i64,
}

fn default_permanent_horizon_days() -> i64 {
    365
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            permanent_horizon_days: default_permanent_horizon_days(),
        }
    }
}

/// Reconciles one tenant's three grant feeds into canonical records.
pub struct AssignmentReconciler<'a> {
    feed: &'a dyn GrantFeed,
    config: ReconcilerConfig,
}

impl<'a> AssignmentReconciler<'a> {
    /// Creates a reconciler over a tenant's feed.
    #[must_use]
    pub fn new(feed: &'a dyn GrantFeed) -> Self {
        Self {
            feed,
            config: ReconcilerConfig::default(),
        }
    }

    /// Creates a reconciler with custom classification config.
    #[must_use]
    pub fn with_config(feed: &'a dyn GrantFeed, config: ReconcilerConfig) -> Self {
        Self { feed, config }
    }

    /// Produces the canonical assignment set for this tenant.
    ///
    /// `now` is the run's capture instant; it anchors the standing-grant
    /// horizon so classification is reproducible.
    ///
    /// Feed enumeration failures are tenant-fatal and surface as
    /// [`EngineError::Feed`]. Per-entry lookup failures (role definition,
    /// principal) are logged and drop only the affected entry.
    #[instrument(skip(self), fields(tenant = %self.feed.tenant()))]
    pub async fn reconcile(&self, now: DateTime<Utc>) -> EngineResult<Vec<AssignmentRecord>> {
        let tenant = self.feed.tenant().to_string();
        let resolver = PrincipalResolver::new(self.feed);
        let expander = GroupExpander::new(self.feed, &resolver);

        let eligible = self
            .feed
            .eligible_schedules()
            .await
            .map_err(|e| EngineError::feed(&tenant, e))?;
        let active = self
            .feed
            .active_schedules()
            .await
            .map_err(|e| EngineError::feed(&tenant, e))?;
        let standing = self
            .feed
            .standing_assignments()
            .await
            .map_err(|e| EngineError::feed(&tenant, e))?;

        // Standing grants already represented by a schedule are skipped.
        // The match is on (principal, role) only; scope is ignored.
        let scheduled_pairs: HashSet<(String, String)> = eligible
            .iter()
            .map(|e| (e.principal_id.clone(), e.role_definition_id.clone()))
            .chain(
                active
                    .iter()
                    .map(|e| (e.principal_id.clone(), e.role_definition_id.clone())),
            )
            .collect();

        let mut records = Vec::new();

        for entry in &eligible {
            let Some((principal, role)) = self
                .resolve_entry(&resolver, &entry.principal_id, &entry.role_definition_id)
                .await
            else {
                continue;
            };
            records.push(build_record(
                &tenant,
                principal,
                &role,
                &entry.scope,
                AssignmentType::Eligible,
                boundary_or(entry.start_time, TimeBoundary::NotApplicable),
                TimeBoundary::or_never(entry.end_time),
                &entry.status,
                &entry.schedule_id,
            ));
        }

        let horizon = now + Duration::days(self.config.permanent_horizon_days);
        for entry in &active {
            let Some((principal, role)) = self
                .resolve_entry(&resolver, &entry.principal_id, &entry.role_definition_id)
                .await
            else {
                continue;
            };

            // An activation whose expiration sits beyond the horizon is a
            // standing grant parked inside the active-schedule feed. The
            // comparison is strictly greater-than: an end exactly at the
            // horizon still counts as a time-boxed activation.
            let parked_permanent = match entry.end_time {
                None => true,
                Some(end) => end > horizon,
            };

            let (assignment_type, end) = if parked_permanent {
                (AssignmentType::Permanent, TimeBoundary::Never)
            } else {
                (
                    AssignmentType::Active,
                    TimeBoundary::or_never(entry.end_time),
                )
            };
            records.push(build_record(
                &tenant,
                principal,
                &role,
                &entry.scope,
                assignment_type,
                boundary_or(entry.start_time, TimeBoundary::NotApplicable),
                end,
                &entry.status,
                &entry.schedule_id,
            ));
        }

        for entry in &standing {
            let pair = (entry.principal_id.clone(), entry.role_definition_id.clone());
            if scheduled_pairs.contains(&pair) {
                continue;
            }
            let Some((principal, role)) = self
                .resolve_entry(&resolver, &entry.principal_id, &entry.role_definition_id)
                .await
            else {
                continue;
            };
            records.push(build_record(
                &tenant,
                principal,
                &role,
                &entry.scope,
                AssignmentType::Permanent,
                TimeBoundary::NotApplicable,
                TimeBoundary::Never,
                "Assigned",
                &entry.assignment_id,
            ));
        }

        // Group grants keep their own record and additionally expand into
        // per-member records.
        let mut expanded = Vec::new();
        for record in records.iter().filter(|r| r.principal.is_group()) {
            expanded.extend(expander.expand(record).await);
        }
        records.append(&mut expanded);

        info!(
            tenant = %tenant,
            records = records.len(),
            "Reconciled tenant assignment set"
        );
        Ok(records)
    }

    /// Resolves the principal and role definition behind one raw entry.
    ///
    /// Either lookup failing drops the entry with a warning; classification
    /// never fails the whole run for one bad row.
    async fn resolve_entry(
        &self,
        resolver: &PrincipalResolver<'_>,
        principal_id: &str,
        role_definition_id: &str,
    ) -> Option<(Principal, RoleDefinition)> {
        let role = match self.feed.role_definition(role_definition_id).await {
            Ok(role) => role,
            Err(err) => {
                warn!(
                    tenant = %self.feed.tenant(),
                    role_definition_id,
                    error = %err,
                    "Role definition lookup failed, dropping entry"
                );
                return None;
            }
        };
        let principal = match resolver.resolve(principal_id).await {
            Ok(p) => p,
            Err(err) => {
                warn!(
                    tenant = %self.feed.tenant(),
                    principal_id,
                    error = %err,
                    "Principal resolution failed, dropping entry"
                );
                return None;
            }
        };
        Some((principal, role))
    }
}

fn boundary_or(value: Option<DateTime<Utc>>, fallback: TimeBoundary) -> TimeBoundary {
    match value {
        Some(at) => TimeBoundary::At(at),
        None => fallback,
    }
}

#[allow(clippy::too_many_arguments)]
fn build_record(
    tenant: &str,
    principal: Principal,
    role: &RoleDefinition,
    scope: &str,
    assignment_type: AssignmentType,
    start: TimeBoundary,
    end: TimeBoundary,
    status: &str,
    source_assignment_id: &str,
) -> AssignmentRecord {
    AssignmentRecord {
        tenant: tenant.to_string(),
        principal,
        role_id: role.id.clone(),
        role_name: role.display_name.clone(),
        scope: scope.to_string(),
        assignment_type,
        pim_managed: assignment_type.is_pim_managed(),
        via_group: DIRECT_ASSIGNMENT.to_string(),
        group_member: false,
        start,
        end,
        status: status.to_string(),
        source_assignment_id: source_assignment_id.to_string(),
    }
}
