//! Typed directory identities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of directory entity that can hold a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalKind {
    /// Interactive user account.
    User,
    /// Non-human service identity (application / workload identity).
    ServiceIdentity,
    /// Security group.
    Group,
    /// Kind could not be determined from the provider record.
    Unknown,
}

impl std::fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrincipalKind::User => write!(f, "User"),
            PrincipalKind::ServiceIdentity => write!(f, "ServiceIdentity"),
            PrincipalKind::Group => write!(f, "Group"),
            PrincipalKind::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A resolved directory identity referenced by an assignment.
///
/// Built once per raw record from provider attributes and never mutated
/// afterwards. The `id` is opaque but stable within a tenant; it is not
/// comparable across tenants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Opaque provider object ID, stable within the tenant.
    pub id: String,
    /// Entity kind.
    pub kind: PrincipalKind,
    /// Display name.
    pub display_name: String,
    /// Login name (UPN); empty for non-user kinds.
    #[serde(default)]
    pub login_name: String,
    /// Primary email address, if any.
    #[serde(default)]
    pub email: String,
    /// Whether the account is enabled. `None` when the provider did not say.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Creation timestamp, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Department attribute.
    #[serde(default)]
    pub department: String,
    /// Job title attribute.
    #[serde(default)]
    pub job_title: String,
    /// Company name attribute.
    #[serde(default)]
    pub company_name: String,
}

impl Principal {
    /// Builds a placeholder principal for an ID that could not be resolved.
    #[must_use]
    pub fn unresolved(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            display_name: id.clone(),
            id,
            kind: PrincipalKind::Unknown,
            login_name: String::new(),
            email: String::new(),
            enabled: None,
            created_at: None,
            department: String::new(),
            job_title: String::new(),
            company_name: String::new(),
        }
    }

    /// True when this principal is a group.
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.kind == PrincipalKind::Group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_principal_uses_id_as_display_name() {
        let p = Principal::unresolved("obj-123");
        assert_eq!(p.id, "obj-123");
        assert_eq!(p.display_name, "obj-123");
        assert_eq!(p.kind, PrincipalKind::Unknown);
        assert_eq!(p.enabled, None);
    }

    #[test]
    fn test_is_group() {
        let mut p = Principal::unresolved("g-1");
        assert!(!p.is_group());
        p.kind = PrincipalKind::Group;
        assert!(p.is_group());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(PrincipalKind::ServiceIdentity.to_string(), "ServiceIdentity");
        assert_eq!(PrincipalKind::Group.to_string(), "Group");
    }
}
