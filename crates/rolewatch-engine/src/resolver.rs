//! Principal resolution with a per-tenant cache.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::warn;

use rolewatch_core::{Principal, PrincipalKind};
use rolewatch_feed::{FeedResult, GrantFeed, RawPrincipal};

/// Resolves opaque principal IDs to typed [`Principal`] identities.
///
/// One resolver exists per tenant task. The cache avoids re-resolving the
/// same principal across roles within one tenant; it is never shared across
/// tenants. Lock scope is a plain map access, never held across an await.
pub struct PrincipalResolver<'a> {
    feed: &'a dyn GrantFeed,
    cache: Mutex<HashMap<String, Principal>>,
}

impl<'a> PrincipalResolver<'a> {
    /// Creates a resolver over a tenant's feed.
    #[must_use]
    pub fn new(feed: &'a dyn GrantFeed) -> Self {
        Self {
            feed,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves a principal ID, consulting the cache first.
    ///
    /// Lookup failures propagate to the caller, which decides whether to
    /// skip the affected entry.
    pub async fn resolve(&self, principal_id: &str) -> FeedResult<Principal> {
        if let Ok(cache) = self.cache.lock() {
            if let Some(hit) = cache.get(principal_id) {
                return Ok(hit.clone());
            }
        }

        let raw = self.feed.resolve_principal(principal_id).await?;
        let principal = map_principal(raw);

        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(principal_id.to_string(), principal.clone());
        }
        Ok(principal)
    }
}

/// Maps raw provider attributes into a typed principal.
fn map_principal(raw: RawPrincipal) -> Principal {
    let kind = match raw.object_type.to_ascii_lowercase().as_str() {
        "user" => PrincipalKind::User,
        "serviceprincipal" | "service_identity" | "application" => PrincipalKind::ServiceIdentity,
        "group" => PrincipalKind::Group,
        other => {
            warn!(
                principal_id = %raw.id,
                object_type = other,
                "Unrecognized principal object type"
            );
            PrincipalKind::Unknown
        }
    };

    Principal {
        id: raw.id,
        kind,
        display_name: raw.display_name,
        login_name: raw.login_name.unwrap_or_default(),
        email: raw.email.unwrap_or_default(),
        enabled: raw.enabled,
        created_at: raw.created_at,
        department: raw.department.unwrap_or_default(),
        job_title: raw.job_title.unwrap_or_default(),
        company_name: raw.company_name.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolewatch_feed::{InMemoryFeed, TenantData};

    fn raw(id: &str, object_type: &str) -> RawPrincipal {
        RawPrincipal {
            id: id.to_string(),
            object_type: object_type.to_string(),
            display_name: format!("Principal {id}"),
            login_name: None,
            email: None,
            enabled: Some(true),
            created_at: None,
            department: Some("Engineering".to_string()),
            job_title: None,
            company_name: None,
        }
    }

    #[tokio::test]
    async fn test_resolve_maps_kinds() {
        let feed = InMemoryFeed::new(TenantData {
            tenant: "tenant-a".to_string(),
            principals: vec![
                raw("u1", "user"),
                raw("sp1", "servicePrincipal"),
                raw("g1", "group"),
                raw("x1", "device"),
            ],
            ..TenantData::default()
        });
        let resolver = PrincipalResolver::new(&feed);

        assert_eq!(resolver.resolve("u1").await.unwrap().kind, PrincipalKind::User);
        assert_eq!(
            resolver.resolve("sp1").await.unwrap().kind,
            PrincipalKind::ServiceIdentity
        );
        assert_eq!(resolver.resolve("g1").await.unwrap().kind, PrincipalKind::Group);
        assert_eq!(
            resolver.resolve("x1").await.unwrap().kind,
            PrincipalKind::Unknown
        );
    }

    #[tokio::test]
    async fn test_resolve_flattens_optional_attributes() {
        let feed = InMemoryFeed::new(TenantData {
            tenant: "tenant-a".to_string(),
            principals: vec![raw("u1", "user")],
            ..TenantData::default()
        });
        let resolver = PrincipalResolver::new(&feed);

        let principal = resolver.resolve("u1").await.unwrap();
        assert_eq!(principal.department, "Engineering");
        assert_eq!(principal.login_name, "");
        assert_eq!(principal.email, "");
    }

    #[tokio::test]
    async fn test_resolution_failure_propagates() {
        let feed = InMemoryFeed::new(TenantData {
            tenant: "tenant-a".to_string(),
            ..TenantData::default()
        });
        let resolver = PrincipalResolver::new(&feed);

        assert!(resolver.resolve("missing").await.is_err());
    }
}
