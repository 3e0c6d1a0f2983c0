//! HTML summary dashboard.
//!
//! One self-contained page per run: headline counts, per-tenant totals,
//! the standing-access table (the highest-risk posture), and the change
//! list grouped by change type. Plain string templating, no engine.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use rolewatch_core::{AssignmentRecord, AssignmentType, ChangeRecord, ChangeType};

use crate::error::ReportResult;

/// Renders the summary page for one run.
#[must_use]
pub fn render_dashboard(
    date: NaiveDate,
    records: &[AssignmentRecord],
    changes: &[ChangeRecord],
) -> String {
    let eligible = count_type(records, AssignmentType::Eligible);
    let active = count_type(records, AssignmentType::Active);
    let permanent = count_type(records, AssignmentType::Permanent);

    let mut per_tenant: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *per_tenant.entry(record.tenant.as_str()).or_insert(0) += 1;
    }

    let mut page = String::with_capacity(4096);
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str(&format!(
        "<title>Privileged Access Audit {date}</title>\n"
    ));
    page.push_str(
        "<style>\n\
         body { font-family: sans-serif; margin: 2em; }\n\
         table { border-collapse: collapse; margin: 1em 0; }\n\
         th, td { border: 1px solid #ccc; padding: 4px 10px; text-align: left; }\n\
         th { background: #f0f0f0; }\n\
         .permanent { color: #a00; font-weight: bold; }\n\
         </style>\n</head>\n<body>\n",
    );
    page.push_str(&format!("<h1>Privileged Access Audit {date}</h1>\n"));

    page.push_str("<h2>Summary</h2>\n<table>\n");
    page.push_str("<tr><th>Eligible</th><th>Active</th><th>Permanent</th><th>Total</th></tr>\n");
    page.push_str(&format!(
        "<tr><td>{eligible}</td><td>{active}</td><td class=\"permanent\">{permanent}</td><td>{}</td></tr>\n",
        records.len()
    ));
    page.push_str("</table>\n");

    page.push_str("<h2>Assignments per tenant</h2>\n<table>\n");
    page.push_str("<tr><th>Tenant</th><th>Assignments</th></tr>\n");
    for (tenant, count) in &per_tenant {
        page.push_str(&format!(
            "<tr><td>{}</td><td>{count}</td></tr>\n",
            escape(tenant)
        ));
    }
    page.push_str("</table>\n");

    page.push_str("<h2>Standing access</h2>\n<table>\n");
    page.push_str(
        "<tr><th>Tenant</th><th>Principal</th><th>Kind</th><th>Role</th><th>Via</th></tr>\n",
    );
    for record in records
        .iter()
        .filter(|r| r.assignment_type == AssignmentType::Permanent)
    {
        page.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&record.tenant),
            escape(&record.principal.display_name),
            record.principal.kind,
            escape(&record.role_name),
            escape(&record.via_group),
        ));
    }
    page.push_str("</table>\n");

    for change_type in [ChangeType::New, ChangeType::Removed, ChangeType::Modified] {
        let group: Vec<&ChangeRecord> = changes
            .iter()
            .filter(|c| c.change_type == change_type)
            .collect();
        page.push_str(&format!(
            "<h2>{change_type} ({})</h2>\n",
            group.len()
        ));
        if group.is_empty() {
            continue;
        }
        page.push_str("<table>\n<tr><th>Tenant</th><th>Principal</th><th>Role</th><th>Previous</th><th>Current</th><th>Description</th></tr>\n");
        for change in group {
            page.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&change.tenant),
                escape(&change.principal_name),
                escape(&change.role_name),
                escape(&change.previous_value),
                escape(&change.current_value),
                escape(&change.description),
            ));
        }
        page.push_str("</table>\n");
    }

    page.push_str("</body>\n</html>\n");
    page
}

/// Renders and writes the summary page to a file.
pub fn export_dashboard(
    path: &Path,
    date: NaiveDate,
    records: &[AssignmentRecord],
    changes: &[ChangeRecord],
) -> ReportResult<()> {
    let page = render_dashboard(date, records, changes);
    std::fs::write(path, page)?;
    info!(path = %path.display(), "Exported HTML dashboard");
    Ok(())
}

fn count_type(records: &[AssignmentRecord], assignment_type: AssignmentType) -> usize {
    records
        .iter()
        .filter(|r| r.assignment_type == assignment_type)
        .count()
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rolewatch_core::{Principal, PrincipalKind, TimeBoundary, DIRECT_ASSIGNMENT};

    fn record(principal_name: &str, assignment_type: AssignmentType) -> AssignmentRecord {
        AssignmentRecord {
            tenant: "tenant-a".to_string(),
            principal: Principal {
                kind: PrincipalKind::User,
                display_name: principal_name.to_string(),
                ..Principal::unresolved("p1")
            },
            role_id: "r-1".to_string(),
            role_name: "Reader".to_string(),
            scope: "/".to_string(),
            pim_managed: assignment_type.is_pim_managed(),
            assignment_type,
            via_group: DIRECT_ASSIGNMENT.to_string(),
            group_member: false,
            start: TimeBoundary::NotApplicable,
            end: TimeBoundary::Never,
            status: String::new(),
            source_assignment_id: "s-1".to_string(),
        }
    }

    #[test]
    fn test_dashboard_contains_counts_and_sections() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        let records = vec![
            record("Alice", AssignmentType::Eligible),
            record("Bob", AssignmentType::Permanent),
        ];

        let page = render_dashboard(date, &records, &[]);

        assert!(page.contains("2026-08-24"));
        assert!(page.contains("Standing access"));
        assert!(page.contains("Bob"));
        assert!(page.contains("New (0)"));
    }

    #[test]
    fn test_dashboard_escapes_markup() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        let records = vec![record("<script>alert(1)</script>", AssignmentType::Permanent)];

        let page = render_dashboard(date, &records, &[]);

        assert!(!page.contains("<script>alert"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_dashboard_groups_changes_by_type() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        let change = ChangeRecord {
            change_type: ChangeType::New,
            tenant: "tenant-a".to_string(),
            principal_id: "p1".to_string(),
            principal_name: "Alice".to_string(),
            role_name: "Reader".to_string(),
            previous_value: "N/A".to_string(),
            current_value: "Eligible".to_string(),
            description: "New Eligible assignment for Alice (Reader)".to_string(),
            detected_at: Utc::now(),
            diff_key: "tenant-a|p1|Reader".to_string(),
        };

        let page = render_dashboard(date, &[], &[change]);

        assert!(page.contains("New (1)"));
        assert!(page.contains("Removed (0)"));
    }
}
