//! Group expansion.
//!
//! A group-typed assignment grants the role to every direct member of the
//! group. Expansion derives one record per member, tagged with provenance,
//! while the group's own record stays with the caller.

use tracing::{debug, warn};

use rolewatch_core::AssignmentRecord;
use rolewatch_feed::GrantFeed;

use crate::resolver::PrincipalResolver;

/// Expands group-typed assignments into per-member records.
pub struct GroupExpander<'a> {
    feed: &'a dyn GrantFeed,
    resolver: &'a PrincipalResolver<'a>,
}

impl<'a> GroupExpander<'a> {
    /// Creates an expander over a tenant's feed and resolver.
    #[must_use]
    pub fn new(feed: &'a dyn GrantFeed, resolver: &'a PrincipalResolver<'a>) -> Self {
        Self { feed, resolver }
    }

    /// Derives one record per direct member of the group behind `parent`.
    ///
    /// Traversal is a single level: members that are themselves groups are
    /// dropped, which bounds the walk and breaks nesting cycles without any
    /// cycle-detection machinery. Failure to enumerate the membership is
    /// non-fatal and yields an empty list, so the caller still retains the
    /// group's own record.
    pub async fn expand(&self, parent: &AssignmentRecord) -> Vec<AssignmentRecord> {
        let group = &parent.principal;

        let member_ids = match self.feed.group_members(&group.id).await {
            Ok(ids) => ids,
            Err(err) => {
                warn!(
                    tenant = %parent.tenant,
                    group = %group.display_name,
                    group_id = %group.id,
                    error = %err,
                    "Failed to enumerate group membership, skipping expansion"
                );
                return Vec::new();
            }
        };

        let mut derived = Vec::with_capacity(member_ids.len());
        for member_id in member_ids {
            let member = match self.resolver.resolve(&member_id).await {
                Ok(p) => p,
                Err(err) => {
                    warn!(
                        tenant = %parent.tenant,
                        group = %group.display_name,
                        member_id = %member_id,
                        error = %err,
                        "Failed to resolve group member, skipping"
                    );
                    continue;
                }
            };

            // One level only: a group nested inside a group is not expanded.
            if member.is_group() {
                debug!(
                    tenant = %parent.tenant,
                    group = %group.display_name,
                    nested_group = %member.display_name,
                    "Dropping nested group from expansion"
                );
                continue;
            }

            let source_id =
                AssignmentRecord::member_source_id(&parent.source_assignment_id, &member.id);
            derived.push(AssignmentRecord {
                principal: member,
                via_group: group.display_name.clone(),
                group_member: true,
                source_assignment_id: source_id,
                ..parent.clone()
            });
        }

        derived
    }
}
