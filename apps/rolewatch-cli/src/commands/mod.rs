//! CLI command implementations.

pub mod diff;
pub mod history;
pub mod run;
