//! Role-Grant Feed Contracts
//!
//! This crate defines the boundary between the reconciliation engine and the
//! identity provider: the raw record shapes the three grant feeds deliver
//! and the [`GrantFeed`] trait a provider integration implements. Network
//! transport and authentication live behind the trait; the engine never
//! sees them.
//!
//! [`memory::InMemoryFeed`] is a complete in-process implementation used by
//! the test suites and by local demo runs.

pub mod error;
pub mod memory;
pub mod traits;
pub mod types;

pub use error::{FeedError, FeedResult};
pub use memory::{InMemoryFeed, TenantData};
pub use traits::GrantFeed;
pub use types::{
    ActiveScheduleEntry, EligibleScheduleEntry, RawPrincipal, RoleDefinition,
    StandingAssignmentEntry,
};
