//! Audit Result Export
//!
//! Renders a run's canonical assignment set and change-set into the files
//! the audit consumers read: flat CSV exports for spreadsheet analysis and
//! a self-contained HTML summary page. Output files are date-stamped with
//! the run's capture date.

pub mod csv;
pub mod error;
pub mod html;
pub mod naming;

pub use error::{ReportError, ReportResult};
