//! In-memory grant feed.
//!
//! Backs the test suites and local demo runs. Tenant data is plain serde
//! structs, so a whole tenant can be loaded from a JSON fixture file.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{FeedError, FeedResult};
use crate::traits::GrantFeed;
use crate::types::{
    ActiveScheduleEntry, EligibleScheduleEntry, RawPrincipal, RoleDefinition,
    StandingAssignmentEntry,
};

/// Complete grant data for one tenant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TenantData {
    /// Tenant identifier.
    pub tenant: String,
    /// Eligible-schedule feed contents.
    #[serde(default)]
    pub eligible: Vec<EligibleScheduleEntry>,
    /// Active-schedule feed contents.
    #[serde(default)]
    pub active: Vec<ActiveScheduleEntry>,
    /// Legacy standing-assignment feed contents.
    #[serde(default)]
    pub standing: Vec<StandingAssignmentEntry>,
    /// Resolvable principals.
    #[serde(default)]
    pub principals: Vec<RawPrincipal>,
    /// Group ID to direct member IDs.
    #[serde(default)]
    pub memberships: HashMap<String, Vec<String>>,
    /// Known role definitions.
    #[serde(default)]
    pub roles: Vec<RoleDefinition>,
}

/// [`GrantFeed`] implementation over [`TenantData`].
///
/// Failure injection (`fail_all`, `fail_memberships`) exists for exercising
/// the engine's degraded paths; it is never part of serialized fixtures.
#[derive(Debug, Default)]
pub struct InMemoryFeed {
    data: TenantData,
    principals: HashMap<String, RawPrincipal>,
    roles: HashMap<String, RoleDefinition>,
    fail_all: bool,
    fail_memberships: HashSet<String>,
}

impl InMemoryFeed {
    /// Builds a feed over the given tenant data.
    #[must_use]
    pub fn new(data: TenantData) -> Self {
        let principals = data
            .principals
            .iter()
            .map(|p| (p.id.clone(), p.clone()))
            .collect();
        let roles = data
            .roles
            .iter()
            .map(|r| (r.id.clone(), r.clone()))
            .collect();
        Self {
            data,
            principals,
            roles,
            fail_all: false,
            fail_memberships: HashSet::new(),
        }
    }

    /// Makes every feed operation fail with a transport error, simulating a
    /// tenant whose provider is unreachable.
    #[must_use]
    pub fn failing(tenant: impl Into<String>) -> Self {
        let mut feed = Self::new(TenantData {
            tenant: tenant.into(),
            ..TenantData::default()
        });
        feed.fail_all = true;
        feed
    }

    /// Makes membership enumeration fail for one group.
    pub fn fail_membership_for(&mut self, group_id: impl Into<String>) {
        self.fail_memberships.insert(group_id.into());
    }

    fn check_reachable(&self) -> FeedResult<()> {
        if self.fail_all {
            return Err(FeedError::Transport(format!(
                "tenant {} unreachable",
                self.data.tenant
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl GrantFeed for InMemoryFeed {
    fn tenant(&self) -> &str {
        &self.data.tenant
    }

    async fn eligible_schedules(&self) -> FeedResult<Vec<EligibleScheduleEntry>> {
        self.check_reachable()?;
        Ok(self.data.eligible.clone())
    }

    async fn active_schedules(&self) -> FeedResult<Vec<ActiveScheduleEntry>> {
        self.check_reachable()?;
        Ok(self.data.active.clone())
    }

    async fn standing_assignments(&self) -> FeedResult<Vec<StandingAssignmentEntry>> {
        self.check_reachable()?;
        Ok(self.data.standing.clone())
    }

    async fn resolve_principal(&self, principal_id: &str) -> FeedResult<RawPrincipal> {
        self.check_reachable()?;
        self.principals
            .get(principal_id)
            .cloned()
            .ok_or_else(|| FeedError::NotFound(format!("principal {principal_id}")))
    }

    async fn group_members(&self, group_id: &str) -> FeedResult<Vec<String>> {
        self.check_reachable()?;
        if self.fail_memberships.contains(group_id) {
            return Err(FeedError::PermissionDenied(format!(
                "membership of group {group_id}"
            )));
        }
        self.data
            .memberships
            .get(group_id)
            .cloned()
            .ok_or_else(|| FeedError::NotFound(format!("group {group_id}")))
    }

    async fn role_definition(&self, role_definition_id: &str) -> FeedResult<RoleDefinition> {
        self.check_reachable()?;
        self.roles
            .get(role_definition_id)
            .cloned()
            .ok_or_else(|| FeedError::NotFound(format!("role definition {role_definition_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> RawPrincipal {
        RawPrincipal {
            id: id.to_string(),
            object_type: "user".to_string(),
            display_name: format!("User {id}"),
            login_name: Some(format!("{id}@example.test")),
            email: None,
            enabled: Some(true),
            created_at: None,
            department: None,
            job_title: None,
            company_name: None,
        }
    }

    #[tokio::test]
    async fn test_resolve_known_principal() {
        let feed = InMemoryFeed::new(TenantData {
            tenant: "tenant-a".to_string(),
            principals: vec![user("user-1")],
            ..TenantData::default()
        });

        let resolved = feed.resolve_principal("user-1").await.unwrap();
        assert_eq!(resolved.display_name, "User user-1");
    }

    #[tokio::test]
    async fn test_resolve_unknown_principal_is_not_found() {
        let feed = InMemoryFeed::new(TenantData {
            tenant: "tenant-a".to_string(),
            ..TenantData::default()
        });

        let err = feed.resolve_principal("missing").await.unwrap_err();
        assert!(matches!(err, FeedError::NotFound(_)));
        assert!(!err.is_tenant_fatal());
    }

    #[tokio::test]
    async fn test_failing_feed_is_tenant_fatal() {
        let feed = InMemoryFeed::failing("tenant-b");
        let err = feed.eligible_schedules().await.unwrap_err();
        assert!(err.is_tenant_fatal());
    }

    #[tokio::test]
    async fn test_membership_failure_injection() {
        let mut feed = InMemoryFeed::new(TenantData {
            tenant: "tenant-a".to_string(),
            memberships: HashMap::from([("group-1".to_string(), vec!["user-1".to_string()])]),
            ..TenantData::default()
        });
        feed.fail_membership_for("group-1");

        let err = feed.group_members("group-1").await.unwrap_err();
        assert!(matches!(err, FeedError::PermissionDenied(_)));
    }

    #[tokio::test]
    async fn test_tenant_data_json_round_trip() {
        let data = TenantData {
            tenant: "tenant-a".to_string(),
            principals: vec![user("user-1")],
            memberships: HashMap::from([("group-1".to_string(), vec!["user-1".to_string()])]),
            roles: vec![RoleDefinition {
                id: "role-1".to_string(),
                display_name: "Reader".to_string(),
            }],
            ..TenantData::default()
        };

        let json = serde_json::to_string(&data).unwrap();
        let back: TenantData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tenant, "tenant-a");
        assert_eq!(back.principals.len(), 1);
        assert_eq!(back.roles[0].display_name, "Reader");
    }
}
