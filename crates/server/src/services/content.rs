//! Role-scoped content access.
//!
//! Sharing visibility is enforced server-side: business admins see every
//! tenant item, agents see items they created or items flagged shared,
//! platform admins see no tenant content detail at all.

use sqlx::PgPool;

use bizgenie_core::{BusinessId, Role, UserId};

use crate::db::{ContentRepository, RepositoryError};
use crate::models::content::ContentItem;
use crate::models::session::CurrentUser;

/// The set of content items a viewer is allowed to observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentScope {
    /// Business admin: every item of the tenant.
    Team(BusinessId),
    /// Agent: own items plus team-shared items.
    OwnOrShared {
        business: BusinessId,
        viewer: UserId,
    },
    /// No tenant binding, or cross-tenant role: the empty set.
    Empty,
}

impl ContentScope {
    /// Derive the scope for a viewer.
    #[must_use]
    pub fn for_viewer(viewer: &CurrentUser) -> Self {
        match viewer.business_id {
            None => Self::Empty,
            Some(business) => match viewer.role {
                Role::BusinessAdmin => Self::Team(business),
                Role::Agent => Self::OwnOrShared {
                    business,
                    viewer: viewer.id,
                },
                // Platform admins observe cross-tenant summaries only,
                // never tenant record detail.
                Role::PlatformAdmin => Self::Empty,
            },
        }
    }

    /// Whether a single item falls inside this scope.
    #[must_use]
    pub fn allows(&self, item: &ContentItem) -> bool {
        match self {
            Self::Team(business) => item.business_id == *business,
            Self::OwnOrShared { business, viewer } => {
                item.business_id == *business && (item.creator_id == *viewer || item.shared)
            }
            Self::Empty => false,
        }
    }

    /// Filter a tenant snapshot down to the visible subset, preserving order.
    #[must_use]
    pub fn filter(&self, items: &[ContentItem]) -> Vec<ContentItem> {
        items
            .iter()
            .filter(|item| self.allows(item))
            .cloned()
            .collect()
    }

    /// Load the visible set from the database.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the scoped query fails.
    pub async fn load(&self, pool: &PgPool) -> Result<Vec<ContentItem>, RepositoryError> {
        let repo = ContentRepository::new(pool);
        match self {
            Self::Team(business) => repo.list_for_business(*business).await,
            Self::OwnOrShared { business, viewer } => {
                repo.list_own_or_shared(*business, *viewer).await
            }
            Self::Empty => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bizgenie_core::{ContentItemId, ContentStatus, ContentType, Email};
    use chrono::Utc;

    fn viewer(role: Role, id: i32, business: Option<i32>) -> CurrentUser {
        CurrentUser {
            id: UserId::new(id),
            email: Email::parse("viewer@skyline.example").unwrap(),
            name: "Viewer".to_string(),
            role,
            business_id: business.map(BusinessId::new),
            onboarded: true,
        }
    }

    fn item(id: i32, business: i32, creator: i32, shared: bool) -> ContentItem {
        ContentItem {
            id: ContentItemId::new(id),
            business_id: BusinessId::new(business),
            creator_id: UserId::new(creator),
            title: format!("Item {id}"),
            content_type: ContentType::Text,
            status: ContentStatus::Draft,
            data: "Why invest in real estate?".to_string(),
            shared,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_business_admin_sees_everything_in_tenant() {
        let admin = viewer(Role::BusinessAdmin, 1, Some(1));
        let scope = ContentScope::for_viewer(&admin);

        let items = vec![item(1, 1, 7, false), item(2, 1, 8, true), item(3, 2, 7, true)];
        let ids: Vec<i32> = scope.filter(&items).iter().map(|i| i.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_agent_sees_own_or_shared() {
        let agent = viewer(Role::Agent, 7, Some(1));
        let scope = ContentScope::for_viewer(&agent);

        let items = vec![
            item(1, 1, 7, false), // own, private
            item(2, 1, 8, false), // someone else's, private
            item(3, 1, 8, true),  // someone else's, shared
        ];
        let ids: Vec<i32> = scope.filter(&items).iter().map(|i| i.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_platform_admin_sees_no_tenant_detail() {
        let admin = viewer(Role::PlatformAdmin, 1, Some(1));
        assert_eq!(ContentScope::for_viewer(&admin), ContentScope::Empty);
    }

    #[test]
    fn test_no_business_yields_empty() {
        let agent = viewer(Role::Agent, 7, None);
        let scope = ContentScope::for_viewer(&agent);
        assert_eq!(scope, ContentScope::Empty);
        assert!(scope.filter(&[item(1, 1, 7, true)]).is_empty());
    }
}
