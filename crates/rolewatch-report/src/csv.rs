//! CSV export.
//!
//! Flat row shapes suitable for spreadsheet analysis; one row per
//! assignment or change record.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use rolewatch_core::{AssignmentRecord, ChangeRecord};

use crate::error::ReportResult;

/// CSV row for an assignment record.
#[derive(Debug, Serialize)]
pub struct CsvAssignmentRow {
    tenant: String,
    principal_id: String,
    principal_name: String,
    principal_kind: String,
    login_name: String,
    email: String,
    enabled: String,
    department: String,
    job_title: String,
    company_name: String,
    role_name: String,
    scope: String,
    assignment_type: String,
    pim_managed: bool,
    via_group: String,
    group_member: bool,
    start: String,
    end: String,
    status: String,
    source_assignment_id: String,
}

impl From<&AssignmentRecord> for CsvAssignmentRow {
    fn from(record: &AssignmentRecord) -> Self {
        Self {
            tenant: record.tenant.clone(),
            principal_id: record.principal.id.clone(),
            principal_name: record.principal.display_name.clone(),
            principal_kind: record.principal.kind.to_string(),
            login_name: record.principal.login_name.clone(),
            email: record.principal.email.clone(),
            enabled: match record.principal.enabled {
                Some(true) => "true".to_string(),
                Some(false) => "false".to_string(),
                None => "unknown".to_string(),
            },
            department: record.principal.department.clone(),
            job_title: record.principal.job_title.clone(),
            company_name: record.principal.company_name.clone(),
            role_name: record.role_name.clone(),
            scope: record.scope.clone(),
            assignment_type: record.assignment_type.to_string(),
            pim_managed: record.pim_managed,
            via_group: record.via_group.clone(),
            group_member: record.group_member,
            start: record.start.to_string(),
            end: record.end.to_string(),
            status: record.status.clone(),
            source_assignment_id: record.source_assignment_id.clone(),
        }
    }
}

/// CSV row for a change record.
#[derive(Debug, Serialize)]
pub struct CsvChangeRow {
    change_type: String,
    tenant: String,
    principal_id: String,
    principal_name: String,
    role_name: String,
    previous_value: String,
    current_value: String,
    description: String,
    detected_at: String,
}

impl From<&ChangeRecord> for CsvChangeRow {
    fn from(change: &ChangeRecord) -> Self {
        Self {
            change_type: change.change_type.to_string(),
            tenant: change.tenant.clone(),
            principal_id: change.principal_id.clone(),
            principal_name: change.principal_name.clone(),
            role_name: change.role_name.clone(),
            previous_value: change.previous_value.clone(),
            current_value: change.current_value.clone(),
            description: change.description.clone(),
            detected_at: change.detected_at.to_rfc3339(),
        }
    }
}

/// Writes the assignment set as CSV rows, header included.
pub fn write_assignments<W: Write>(writer: W, records: &[AssignmentRecord]) -> ReportResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(CsvAssignmentRow::from(record))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the change-set as CSV rows, header included.
pub fn write_changes<W: Write>(writer: W, changes: &[ChangeRecord]) -> ReportResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for change in changes {
        wtr.serialize(CsvChangeRow::from(change))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Exports the assignment set to a CSV file.
pub fn export_assignments(path: &Path, records: &[AssignmentRecord]) -> ReportResult<()> {
    let file = std::fs::File::create(path)?;
    write_assignments(file, records)?;
    info!(path = %path.display(), rows = records.len(), "Exported assignment CSV");
    Ok(())
}

/// Exports the change-set to a CSV file.
pub fn export_changes(path: &Path, changes: &[ChangeRecord]) -> ReportResult<()> {
    let file = std::fs::File::create(path)?;
    write_changes(file, changes)?;
    info!(path = %path.display(), rows = changes.len(), "Exported change CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rolewatch_core::{
        AssignmentType, ChangeType, Principal, PrincipalKind, TimeBoundary, DIRECT_ASSIGNMENT,
    };

    fn record(principal_id: &str) -> AssignmentRecord {
        AssignmentRecord {
            tenant: "tenant-a".to_string(),
            principal: Principal {
                kind: PrincipalKind::User,
                enabled: Some(true),
                ..Principal::unresolved(principal_id)
            },
            role_id: "r-1".to_string(),
            role_name: "Reader".to_string(),
            scope: "/".to_string(),
            assignment_type: AssignmentType::Permanent,
            pim_managed: false,
            via_group: DIRECT_ASSIGNMENT.to_string(),
            group_member: false,
            start: TimeBoundary::NotApplicable,
            end: TimeBoundary::Never,
            status: "Assigned".to_string(),
            source_assignment_id: "assign-1".to_string(),
        }
    }

    #[test]
    fn test_assignment_csv_row_count_matches_record_count() {
        let records = vec![record("p1"), record("p2"), record("p3")];
        let mut buffer = Vec::new();
        write_assignments(&mut buffer, &records).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        // Header plus one row per record.
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().next().unwrap().contains("assignment_type"));
    }

    #[test]
    fn test_assignment_csv_renders_sentinels() {
        let mut buffer = Vec::new();
        write_assignments(&mut buffer, &[record("p1")]).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("N/A"));
        assert!(text.contains("Never"));
        assert!(text.contains("Permanent"));
    }

    #[test]
    fn test_change_csv_round_trips_fields() {
        let change = ChangeRecord {
            change_type: ChangeType::Modified,
            tenant: "tenant-a".to_string(),
            principal_id: "p1".to_string(),
            principal_name: "Alice".to_string(),
            role_name: "Reader".to_string(),
            previous_value: "Eligible".to_string(),
            current_value: "Permanent".to_string(),
            description: "Assignment type changed from Eligible to Permanent".to_string(),
            detected_at: Utc::now(),
            diff_key: "tenant-a|p1|Reader".to_string(),
        };

        let mut buffer = Vec::new();
        write_changes(&mut buffer, &[change]).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("Modified"));
        assert!(text.contains("Eligible"));
        assert!(text.contains("Permanent"));
    }

    #[test]
    fn test_export_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assignments.csv");
        export_assignments(&path, &[record("p1")]).unwrap();
        assert!(path.exists());
    }
}
