//! Common test utilities for rolewatch-engine integration tests.

use chrono::{DateTime, TimeZone, Utc};

use rolewatch_feed::{
    ActiveScheduleEntry, EligibleScheduleEntry, RawPrincipal, RoleDefinition,
    StandingAssignmentEntry, TenantData,
};

/// Fixed capture instant shared by the scenario tests.
pub fn capture_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 24, 12, 0, 0).unwrap()
}

/// Test data factory for a user principal.
pub fn user(id: &str, name: &str) -> RawPrincipal {
    RawPrincipal {
        id: id.to_string(),
        object_type: "user".to_string(),
        display_name: name.to_string(),
        login_name: Some(format!("{id}@contoso.test")),
        email: Some(format!("{id}@contoso.test")),
        enabled: Some(true),
        created_at: None,
        department: Some("IT".to_string()),
        job_title: Some("Engineer".to_string()),
        company_name: Some("Contoso".to_string()),
    }
}

/// Test data factory for a group principal.
pub fn group(id: &str, name: &str) -> RawPrincipal {
    RawPrincipal {
        id: id.to_string(),
        object_type: "group".to_string(),
        display_name: name.to_string(),
        login_name: None,
        email: None,
        enabled: None,
        created_at: None,
        department: None,
        job_title: None,
        company_name: None,
    }
}

/// Test data factory for a role definition.
pub fn role(id: &str, name: &str) -> RoleDefinition {
    RoleDefinition {
        id: id.to_string(),
        display_name: name.to_string(),
    }
}

/// Test data factory for an eligible-schedule entry.
pub fn eligible(
    schedule_id: &str,
    principal_id: &str,
    role_id: &str,
    end_time: Option<DateTime<Utc>>,
) -> EligibleScheduleEntry {
    EligibleScheduleEntry {
        schedule_id: schedule_id.to_string(),
        principal_id: principal_id.to_string(),
        role_definition_id: role_id.to_string(),
        scope: "/".to_string(),
        created_at: Some(capture_instant()),
        start_time: Some(capture_instant()),
        end_time,
        status: "Provisioned".to_string(),
    }
}

/// Test data factory for an active-schedule entry.
pub fn active(
    schedule_id: &str,
    principal_id: &str,
    role_id: &str,
    end_time: Option<DateTime<Utc>>,
) -> ActiveScheduleEntry {
    ActiveScheduleEntry {
        schedule_id: schedule_id.to_string(),
        principal_id: principal_id.to_string(),
        role_definition_id: role_id.to_string(),
        scope: "/".to_string(),
        created_at: Some(capture_instant()),
        start_time: Some(capture_instant()),
        end_time,
        status: "Provisioned".to_string(),
    }
}

/// Test data factory for a legacy standing assignment.
pub fn standing(assignment_id: &str, principal_id: &str, role_id: &str) -> StandingAssignmentEntry {
    StandingAssignmentEntry {
        assignment_id: assignment_id.to_string(),
        principal_id: principal_id.to_string(),
        role_definition_id: role_id.to_string(),
        scope: "/".to_string(),
        created_at: None,
    }
}

/// Empty tenant data shell.
pub fn tenant(name: &str) -> TenantData {
    TenantData {
        tenant: name.to_string(),
        ..TenantData::default()
    }
}
