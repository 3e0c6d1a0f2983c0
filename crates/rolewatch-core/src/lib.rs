//! rolewatch Core Library
//!
//! Shared data model for the rolewatch privileged-access auditor.
//!
//! # Modules
//!
//! - [`principal`] - Typed directory identities (`Principal`, `PrincipalKind`)
//! - [`assignment`] - Canonical assignment records (`AssignmentRecord`, `AssignmentType`)
//! - [`change`] - Snapshot-to-snapshot change records (`ChangeRecord`, `ChangeType`)

pub mod assignment;
pub mod change;
pub mod principal;

pub use assignment::{AssignmentRecord, AssignmentType, TimeBoundary, DIRECT_ASSIGNMENT};
pub use change::{ChangeRecord, ChangeType, NOT_APPLICABLE};
pub use principal::{Principal, PrincipalKind};
