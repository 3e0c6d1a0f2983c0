//! Grant feed trait.

use async_trait::async_trait;

use crate::error::FeedResult;
use crate::types::{
    ActiveScheduleEntry, EligibleScheduleEntry, RawPrincipal, RoleDefinition,
    StandingAssignmentEntry,
};

/// Per-tenant source of role-grant data.
///
/// A `GrantFeed` is scoped to one tenant's credentials. Implementations must
/// be safe for concurrent use: the engine runs group-membership and
/// principal lookups for one tenant concurrently.
#[async_trait]
pub trait GrantFeed: Send + Sync {
    /// Tenant this feed is scoped to.
    fn tenant(&self) -> &str;

    /// Enumerates the eligible-schedule feed.
    async fn eligible_schedules(&self) -> FeedResult<Vec<EligibleScheduleEntry>>;

    /// Enumerates the active-schedule feed.
    async fn active_schedules(&self) -> FeedResult<Vec<ActiveScheduleEntry>>;

    /// Enumerates the legacy standing-assignment feed.
    async fn standing_assignments(&self) -> FeedResult<Vec<StandingAssignmentEntry>>;

    /// Resolves an opaque principal ID to its raw attributes.
    ///
    /// Returns `FeedError::NotFound` when no such object exists.
    async fn resolve_principal(&self, principal_id: &str) -> FeedResult<RawPrincipal>;

    /// Enumerates the direct members of a group, as principal IDs.
    async fn group_members(&self, group_id: &str) -> FeedResult<Vec<String>>;

    /// Looks up a role definition by ID.
    ///
    /// Returns `FeedError::NotFound` for unknown role definitions.
    async fn role_definition(&self, role_definition_id: &str) -> FeedResult<RoleDefinition>;
}
