//! Snapshot-to-snapshot change records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assignment::AssignmentRecord;

/// Value shown when a side of a change has no counterpart (new or removed
/// assignments).
pub const NOT_APPLICABLE: &str = "N/A";

/// Type of change detected between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeType {
    /// Assignment present in the current snapshot only.
    New,
    /// Assignment present in the previous snapshot only.
    Removed,
    /// Assignment present in both with a differing field.
    Modified,
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeType::New => write!(f, "New"),
            ChangeType::Removed => write!(f, "Removed"),
            ChangeType::Modified => write!(f, "Modified"),
        }
    }
}

/// One detected difference between two snapshots.
///
/// `detected_at` is the time of comparison, not of the underlying
/// directory event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Kind of difference.
    pub change_type: ChangeType,
    /// Tenant the assignment belongs to.
    pub tenant: String,
    /// Principal object ID.
    pub principal_id: String,
    /// Principal display name.
    pub principal_name: String,
    /// Role display name.
    pub role_name: String,
    /// Value before the change, or [`NOT_APPLICABLE`].
    pub previous_value: String,
    /// Value after the change, or [`NOT_APPLICABLE`].
    pub current_value: String,
    /// Free-text description of the change.
    pub description: String,
    /// When the comparison ran.
    pub detected_at: DateTime<Utc>,
    /// Composite diff key the change was matched on.
    pub diff_key: String,
}

impl ChangeRecord {
    /// Builds a change record for `record`, filling the descriptive fields
    /// shared by every change type.
    #[must_use]
    pub fn for_assignment(
        change_type: ChangeType,
        record: &AssignmentRecord,
        previous_value: impl Into<String>,
        current_value: impl Into<String>,
        description: impl Into<String>,
        detected_at: DateTime<Utc>,
    ) -> Self {
        Self {
            change_type,
            tenant: record.tenant.clone(),
            principal_id: record.principal.id.clone(),
            principal_name: record.principal.display_name.clone(),
            role_name: record.role_name.clone(),
            previous_value: previous_value.into(),
            current_value: current_value.into(),
            description: description.into(),
            detected_at,
            diff_key: record.diff_key(),
        }
    }
}
