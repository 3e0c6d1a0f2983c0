//! Canonical assignment records.
//!
//! One `AssignmentRecord` is the unit the reconciler produces: the single
//! authoritative description of one (tenant, principal, role) grant for one
//! audit run. Records are constructed fresh every run and never mutated.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::principal::Principal;

/// `via_group` value for assignments not inherited through a group.
pub const DIRECT_ASSIGNMENT: &str = "direct";

/// Classification of an assignment.
///
/// Exactly one applies to every canonical record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignmentType {
    /// Principal may activate the role on demand; not currently exercised.
    Eligible,
    /// A time-boxed activation currently in effect, due to expire.
    Active,
    /// Standing grant with no expiration, outside the activation workflow.
    Permanent,
}

impl AssignmentType {
    /// True for assignments governed by the time-boxed eligible/active
    /// mechanism, false for classic standing grants.
    #[must_use]
    pub fn is_pim_managed(self) -> bool {
        matches!(self, AssignmentType::Eligible | AssignmentType::Active)
    }
}

impl std::fmt::Display for AssignmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentType::Eligible => write!(f, "Eligible"),
            AssignmentType::Active => write!(f, "Active"),
            AssignmentType::Permanent => write!(f, "Permanent"),
        }
    }
}

/// Start or end boundary of a grant window.
///
/// Standing grants have no expiration ("Never") and legacy assignments have
/// no recorded start ("N/A"); both sentinels are modeled explicitly instead
/// of overloading `Option`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "at", rename_all = "snake_case")]
pub enum TimeBoundary {
    /// A concrete instant.
    At(DateTime<Utc>),
    /// No expiration; the grant stands until revoked.
    Never,
    /// The boundary does not apply to this grant.
    NotApplicable,
}

impl TimeBoundary {
    /// Wraps an optional provider timestamp, treating absence as `Never`.
    #[must_use]
    pub fn or_never(value: Option<DateTime<Utc>>) -> Self {
        match value {
            Some(at) => TimeBoundary::At(at),
            None => TimeBoundary::Never,
        }
    }

    /// Returns the concrete instant, if there is one.
    #[must_use]
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            TimeBoundary::At(at) => Some(*at),
            _ => None,
        }
    }
}

impl std::fmt::Display for TimeBoundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeBoundary::At(at) => {
                write!(f, "{}", at.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            TimeBoundary::Never => write!(f, "Never"),
            TimeBoundary::NotApplicable => write!(f, "N/A"),
        }
    }
}

/// Canonical description of one role grant, produced by reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Tenant the grant belongs to.
    pub tenant: String,
    /// Resolved principal snapshot (denormalized).
    pub principal: Principal,
    /// Role definition ID in the provider.
    pub role_id: String,
    /// Role display name.
    pub role_name: String,
    /// Directory scope of the grant.
    pub scope: String,
    /// Classification of the grant.
    pub assignment_type: AssignmentType,
    /// True iff the grant is governed by the eligible/active mechanism.
    pub pim_managed: bool,
    /// Group through which access is inherited, or [`DIRECT_ASSIGNMENT`].
    pub via_group: String,
    /// True for records derived by group expansion.
    pub group_member: bool,
    /// Grant window start.
    pub start: TimeBoundary,
    /// Grant window end.
    pub end: TimeBoundary,
    /// Raw schedule/assignment status as reported by the provider.
    #[serde(default)]
    pub status: String,
    /// Raw source schedule or assignment ID; composite for expanded members.
    pub source_assignment_id: String,
}

impl AssignmentRecord {
    /// Derived source ID for a group-expanded member record.
    ///
    /// Keeps a member's record from colliding with the group's own record
    /// or with another role's expansion of the same group.
    #[must_use]
    pub fn member_source_id(source_assignment_id: &str, member_principal_id: &str) -> String {
        format!("{source_assignment_id}_member_{member_principal_id}")
    }

    /// Composite key used to match records across snapshots.
    ///
    /// Role is identified by display name, not internal ID, so the key
    /// stays stable across minor role-id churn.
    #[must_use]
    pub fn diff_key(&self) -> String {
        format!("{}|{}|{}", self.tenant, self.principal.id, self.role_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::principal::{Principal, PrincipalKind};
    use chrono::TimeZone;

    fn record(tenant: &str, principal_id: &str, role_name: &str) -> AssignmentRecord {
        AssignmentRecord {
            tenant: tenant.to_string(),
            principal: Principal {
                kind: PrincipalKind::User,
                ..Principal::unresolved(principal_id)
            },
            role_id: "role-1".to_string(),
            role_name: role_name.to_string(),
            scope: "/".to_string(),
            assignment_type: AssignmentType::Eligible,
            pim_managed: true,
            via_group: DIRECT_ASSIGNMENT.to_string(),
            group_member: false,
            start: TimeBoundary::NotApplicable,
            end: TimeBoundary::Never,
            status: "Provisioned".to_string(),
            source_assignment_id: "sched-1".to_string(),
        }
    }

    #[test]
    fn test_assignment_type_pim_managed() {
        assert!(AssignmentType::Eligible.is_pim_managed());
        assert!(AssignmentType::Active.is_pim_managed());
        assert!(!AssignmentType::Permanent.is_pim_managed());
    }

    #[test]
    fn test_time_boundary_display_sentinels() {
        assert_eq!(TimeBoundary::Never.to_string(), "Never");
        assert_eq!(TimeBoundary::NotApplicable.to_string(), "N/A");

        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(TimeBoundary::At(at).to_string(), "2026-03-01T12:00:00Z");
    }

    #[test]
    fn test_or_never_treats_absent_expiration_as_never() {
        assert_eq!(TimeBoundary::or_never(None), TimeBoundary::Never);
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(TimeBoundary::or_never(Some(at)), TimeBoundary::At(at));
    }

    #[test]
    fn test_member_source_id_composite() {
        assert_eq!(
            AssignmentRecord::member_source_id("sched-9", "user-3"),
            "sched-9_member_user-3"
        );
    }

    #[test]
    fn test_diff_key_uses_role_display_name() {
        let r = record("tenant-a", "user-1", "Global Reader");
        assert_eq!(r.diff_key(), "tenant-a|user-1|Global Reader");
    }

    #[test]
    fn test_diff_key_distinguishes_tenants() {
        let a = record("tenant-a", "user-1", "Reader");
        let b = record("tenant-b", "user-1", "Reader");
        assert_ne!(a.diff_key(), b.diff_key());
    }

    #[test]
    fn test_record_serde_round_trip() {
        let r = record("tenant-a", "user-1", "Reader");
        let json = serde_json::to_string(&r).unwrap();
        let back: AssignmentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
