//! Assignment Classification & Reconciliation Engine
//!
//! Turns the three raw provider feeds of one tenant into the canonical
//! [`AssignmentRecord`](rolewatch_core::AssignmentRecord) set for an audit
//! run, and orchestrates many tenants concurrently into one run-wide set.
//!
//! # Pipeline
//!
//! raw feeds → [`resolver::PrincipalResolver`] (identity enrichment) →
//! [`reconcile::AssignmentReconciler`] (classification, with group
//! expansion via [`expand::GroupExpander`]) → canonical record set →
//! [`run::execute_run`] (per-tenant worker pool, merged after a join
//! barrier).

pub mod error;
pub mod expand;
pub mod reconcile;
pub mod resolver;
pub mod run;

pub use error::{EngineError, EngineResult};
pub use expand::GroupExpander;
pub use reconcile::{AssignmentReconciler, ReconcilerConfig};
pub use resolver::PrincipalResolver;
pub use run::{execute_run, RunConfig, RunOutcome, RunStatistics, TenantStatus};
