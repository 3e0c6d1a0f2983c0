//! Raw record shapes delivered by the provider feeds.
//!
//! These mirror what the provider returns, before classification. The
//! reconciler owns all interpretation; a feed implementation only maps
//! provider wire formats into these structs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw principal attributes returned by the provider's lookup operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPrincipal {
    /// Provider object ID.
    pub id: String,
    /// Provider object type string (e.g. `"user"`, `"servicePrincipal"`,
    /// `"group"`). Interpretation happens during resolution; unrecognized
    /// values resolve to an Unknown-kind principal.
    pub object_type: String,
    /// Display name.
    pub display_name: String,
    /// Login name (UPN); `None` for non-user kinds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_name: Option<String>,
    /// Primary email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Whether the account is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Creation timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Department attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Job title attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    /// Company name attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

/// Role definition metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    /// Role definition ID.
    pub id: String,
    /// Role display name.
    pub display_name: String,
}

/// One entry from the eligible-schedule feed: the principal may activate
/// the role on demand within the schedule window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibleScheduleEntry {
    /// Schedule ID.
    pub schedule_id: String,
    /// Principal object ID.
    pub principal_id: String,
    /// Role definition ID.
    pub role_definition_id: String,
    /// Directory scope of the grant.
    pub scope: String,
    /// Schedule creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Window start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    /// Window end; `None` for open-ended eligibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Provider schedule status.
    #[serde(default)]
    pub status: String,
}

/// One entry from the active-schedule feed: a role currently in effect.
///
/// The feed mixes genuine time-boxed activations with de-facto-standing
/// grants parked as far-future schedules; the reconciler separates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveScheduleEntry {
    /// Schedule ID.
    pub schedule_id: String,
    /// Principal object ID.
    pub principal_id: String,
    /// Role definition ID.
    pub role_definition_id: String,
    /// Directory scope of the grant.
    pub scope: String,
    /// Schedule creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Window start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    /// Window end; `None` when the schedule carries no expiration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Provider schedule status.
    #[serde(default)]
    pub status: String,
}

/// One entry from the legacy standing-assignment feed: a classic role
/// assignment created outside the activation workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingAssignmentEntry {
    /// Assignment ID.
    pub assignment_id: String,
    /// Principal object ID.
    pub principal_id: String,
    /// Role definition ID.
    pub role_definition_id: String,
    /// Directory scope of the grant.
    pub scope: String,
    /// Assignment creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
