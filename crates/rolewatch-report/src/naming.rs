//! Date-stamped output file naming.

use chrono::NaiveDate;

/// CSV file name for the canonical assignment set of a run.
#[must_use]
pub fn assignments_csv(date: NaiveDate) -> String {
    format!("assignments_{}.csv", date.format("%Y-%m-%d"))
}

/// CSV file name for the change-set of a run.
#[must_use]
pub fn changes_csv(date: NaiveDate) -> String {
    format!("changes_{}.csv", date.format("%Y-%m-%d"))
}

/// HTML summary page file name for a run.
#[must_use]
pub fn dashboard_html(date: NaiveDate) -> String {
    format!("dashboard_{}.html", date.format("%Y-%m-%d"))
}
