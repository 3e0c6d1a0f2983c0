//! Snapshot comparison.
//!
//! A pure, single-pass computation over two immutable record sets. Records
//! are matched on the composite diff key (tenant, principal, role display
//! name); within one snapshot, a duplicated key is last-write-wins.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use rolewatch_core::{AssignmentRecord, ChangeRecord, ChangeType, NOT_APPLICABLE};

/// Compares the current run's record set against the prior run's.
///
/// Emits one `New` or `Removed` record per key present on only one side.
/// For keys present on both sides, an `assignment_type` difference and a
/// `via_group` difference each produce their own `Modified` record, so a
/// single key can contribute up to two changes. Every type change
/// surfaces, including routine Eligible/Active activation churn.
///
/// `detected_at` stamps each change with the time of comparison, not of
/// the underlying directory event. Output ordering is not significant.
#[must_use]
pub fn diff_snapshots(
    current: &[AssignmentRecord],
    previous: &[AssignmentRecord],
    detected_at: DateTime<Utc>,
) -> Vec<ChangeRecord> {
    let current_map = keyed(current);
    let previous_map = keyed(previous);

    let mut changes = Vec::new();

    for (key, record) in &current_map {
        match previous_map.get(key) {
            None => {
                changes.push(ChangeRecord::for_assignment(
                    ChangeType::New,
                    record,
                    NOT_APPLICABLE,
                    record.assignment_type.to_string(),
                    format!(
                        "New {} assignment for {} ({})",
                        record.assignment_type, record.principal.display_name, record.role_name
                    ),
                    detected_at,
                ));
            }
            Some(prior) => {
                if prior.assignment_type != record.assignment_type {
                    changes.push(ChangeRecord::for_assignment(
                        ChangeType::Modified,
                        record,
                        prior.assignment_type.to_string(),
                        record.assignment_type.to_string(),
                        format!(
                            "Assignment type changed from {} to {}",
                            prior.assignment_type, record.assignment_type
                        ),
                        detected_at,
                    ));
                }
                if prior.via_group != record.via_group {
                    changes.push(ChangeRecord::for_assignment(
                        ChangeType::Modified,
                        record,
                        prior.via_group.clone(),
                        record.via_group.clone(),
                        format!(
                            "Assignment path changed from '{}' to '{}'",
                            prior.via_group, record.via_group
                        ),
                        detected_at,
                    ));
                }
            }
        }
    }

    for (key, record) in &previous_map {
        if !current_map.contains_key(key) {
            changes.push(ChangeRecord::for_assignment(
                ChangeType::Removed,
                record,
                record.assignment_type.to_string(),
                NOT_APPLICABLE,
                format!(
                    "{} assignment removed for {} ({})",
                    record.assignment_type, record.principal.display_name, record.role_name
                ),
                detected_at,
            ));
        }
    }

    changes
}

fn keyed(records: &[AssignmentRecord]) -> HashMap<String, &AssignmentRecord> {
    let mut map = HashMap::with_capacity(records.len());
    for record in records {
        map.insert(record.diff_key(), record);
    }
    map
}
