//! Role-scoped lead access and the live lead feed.
//!
//! `LeadScope` is the authorization core: derived exhaustively from the
//! viewer's role and tenant binding, applied both in SQL and as an
//! in-memory filter over feed snapshots.
//!
//! `LeadFeed` gives each tenant a `tokio::sync::watch` channel holding the
//! full insertion-ordered lead set. Subscribers get replay-latest semantics
//! and whole-set replacement on every update; dropping the subscription
//! handle deregisters it, so a dismissed consumer can never observe a
//! late update.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use sqlx::PgPool;
use tokio::sync::watch;

use bizgenie_core::{BusinessId, Role, UserId};

use crate::db::{LeadRepository, RepositoryError};
use crate::models::lead::Lead;
use crate::models::session::CurrentUser;

/// The set of leads a viewer is allowed to observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadScope {
    /// Agent: only leads assigned to them within their tenant.
    Assigned {
        business: BusinessId,
        agent: UserId,
    },
    /// Business admin (or any other tenant-bound role): the whole tenant.
    Business(BusinessId),
    /// No tenant binding: the empty set. Not an error.
    Empty,
}

impl LeadScope {
    /// Derive the scope for a viewer.
    #[must_use]
    pub fn for_viewer(viewer: &CurrentUser) -> Self {
        match viewer.business_id {
            None => Self::Empty,
            Some(business) => match viewer.role {
                Role::Agent => Self::Assigned {
                    business,
                    agent: viewer.id,
                },
                Role::BusinessAdmin | Role::PlatformAdmin => Self::Business(business),
            },
        }
    }

    /// Whether a single lead falls inside this scope.
    #[must_use]
    pub fn allows(&self, lead: &Lead) -> bool {
        match self {
            Self::Assigned { business, agent } => {
                lead.business_id == *business && lead.assigned_to == Some(*agent)
            }
            Self::Business(business) => lead.business_id == *business,
            Self::Empty => false,
        }
    }

    /// Filter a full tenant snapshot down to the visible subset,
    /// preserving order.
    #[must_use]
    pub fn filter(&self, leads: &[Lead]) -> Vec<Lead> {
        leads
            .iter()
            .filter(|lead| self.allows(lead))
            .cloned()
            .collect()
    }

    /// Load the visible set from the database.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the scoped query fails.
    pub async fn load(&self, pool: &PgPool) -> Result<Vec<Lead>, RepositoryError> {
        let repo = LeadRepository::new(pool);
        match self {
            Self::Assigned { business, agent } => repo.list_assigned(*business, *agent).await,
            Self::Business(business) => repo.list_for_business(*business).await,
            Self::Empty => Ok(Vec::new()),
        }
    }

    /// Tenant this scope reads from, if any.
    #[must_use]
    pub const fn business(&self) -> Option<BusinessId> {
        match self {
            Self::Assigned { business, .. } | Self::Business(business) => Some(*business),
            Self::Empty => None,
        }
    }
}

/// Live, per-tenant lead sets.
///
/// One watch channel per business, created lazily on first use. The
/// channel always holds the complete tenant set; role filtering happens
/// on the subscriber side so a single publish fans out to every viewer.
#[derive(Default)]
pub struct LeadFeed {
    channels: Mutex<HashMap<BusinessId, watch::Sender<Arc<Vec<Lead>>>>>,
}

impl LeadFeed {
    /// Create an empty feed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn sender(&self, business: BusinessId) -> watch::Sender<Arc<Vec<Lead>>> {
        let mut channels = self
            .channels
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        channels
            .entry(business)
            .or_insert_with(|| watch::channel(Arc::new(Vec::new())).0)
            .clone()
    }

    /// Replace a tenant's lead set, waking every subscriber.
    pub fn publish(&self, business: BusinessId, leads: Vec<Lead>) {
        // send_replace updates the value even when nobody is subscribed
        self.sender(business).send_replace(Arc::new(leads));
    }

    /// Reload a tenant's leads from the database and publish them.
    ///
    /// A failed reload leaves the last-known set in place; the error is
    /// reported to the caller and logged, never propagated as a fault to
    /// subscribers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the reload query fails.
    pub async fn refresh(
        &self,
        pool: &PgPool,
        business: BusinessId,
    ) -> Result<(), RepositoryError> {
        match LeadRepository::new(pool).list_for_business(business).await {
            Ok(leads) => {
                self.publish(business, leads);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    business = %business,
                    error = %e,
                    "lead feed refresh failed; keeping last-known set"
                );
                Err(e)
            }
        }
    }

    /// Subscribe a viewer to their scoped view of the feed.
    ///
    /// The subscription starts with the latest published set (replay-latest).
    /// Viewers without a tenant get a subscription that yields the empty set
    /// and then ends.
    #[must_use]
    pub fn subscribe(&self, viewer: &CurrentUser) -> LeadSubscription {
        let scope = LeadScope::for_viewer(viewer);
        let rx = scope.business().map_or_else(
            || {
                // Detached channel: current() is empty, changed() ends at once
                let (tx, rx) = watch::channel(Arc::new(Vec::new()));
                drop(tx);
                rx
            },
            |business| self.sender(business).subscribe(),
        );

        LeadSubscription { scope, rx }
    }

    /// Number of live subscriptions on a tenant's channel.
    #[must_use]
    pub fn subscriber_count(&self, business: BusinessId) -> usize {
        self.sender(business).receiver_count()
    }
}

/// A viewer's handle onto the live lead feed.
///
/// Holds the watch receiver; dropping the handle releases the
/// subscription.
pub struct LeadSubscription {
    scope: LeadScope,
    rx: watch::Receiver<Arc<Vec<Lead>>>,
}

impl LeadSubscription {
    /// The latest visible set, scope filter applied, marking the value seen.
    #[must_use]
    pub fn current(&mut self) -> Vec<Lead> {
        let snapshot = Arc::clone(&self.rx.borrow_and_update());
        self.scope.filter(&snapshot)
    }

    /// Wait for the next whole-set replacement.
    ///
    /// # Errors
    ///
    /// Returns `RecvError` once the feed side is gone, which ends the
    /// subscription.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.rx.changed().await
    }

    /// The scope this subscription filters through.
    #[must_use]
    pub const fn scope(&self) -> &LeadScope {
        &self.scope
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bizgenie_core::{Email, LeadId, LeadScore, LeadSource, LeadStatus};
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

    fn lead(id: i32, business: i32, assigned_to: Option<i32>) -> Lead {
        Lead {
            id: LeadId::new(id),
            business_id: BusinessId::new(business),
            name: format!("Lead {id}"),
            email: format!("lead{id}@example.com"),
            phone: "+91 98765 43210".to_string(),
            source: LeadSource::Website,
            status: LeadStatus::New,
            score: LeadScore::DEFAULT,
            requirements: None,
            assigned_to: assigned_to.map(UserId::new),
            last_interaction: Utc::now(),
            created_at: Utc::now(),
        }
    }

    // =========================================================================
    // Scope derivation and filtering
    // =========================================================================

    #[test]
    fn test_agent_scope_is_exactly_assigned_set() {
        let agent = viewer(Role::Agent, 7, Some(1));
        let scope = LeadScope::for_viewer(&agent);
        assert_eq!(
            scope,
            LeadScope::Assigned {
                business: BusinessId::new(1),
                agent: UserId::new(7),
            }
        );

        let leads = vec![
            lead(1, 1, Some(7)),
            lead(2, 1, Some(8)),
            lead(3, 1, None),
            lead(4, 1, Some(7)),
        ];
        let visible = scope.filter(&leads);
        let ids: Vec<i32> = visible.iter().map(|l| l.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_business_admin_scope_sees_whole_tenant() {
        let admin = viewer(Role::BusinessAdmin, 1, Some(1));
        let scope = LeadScope::for_viewer(&admin);
        assert_eq!(scope, LeadScope::Business(BusinessId::new(1)));

        let leads = vec![lead(1, 1, Some(7)), lead(2, 1, None), lead(3, 2, None)];
        let visible = scope.filter(&leads);
        let ids: Vec<i32> = visible.iter().map(|l| l.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_no_business_yields_empty_scope_not_error() {
        let admin = viewer(Role::PlatformAdmin, 1, None);
        let scope = LeadScope::for_viewer(&admin);
        assert_eq!(scope, LeadScope::Empty);
        assert!(scope.filter(&[lead(1, 1, None)]).is_empty());
        assert_eq!(scope.business(), None);
    }

    #[test]
    fn test_filter_preserves_insertion_order() {
        let scope = LeadScope::Business(BusinessId::new(1));
        let leads = vec![lead(5, 1, None), lead(2, 1, None), lead(9, 1, None)];
        let ids: Vec<i32> = scope.filter(&leads).iter().map(|l| l.id.as_i32()).collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }

    // =========================================================================
    // Live feed
    // =========================================================================

    #[tokio::test]
    async fn test_subscribe_replays_latest_set() {
        let feed = LeadFeed::new();
        feed.publish(BusinessId::new(1), vec![lead(1, 1, None)]);

        // Subscribing after the publish still observes the latest set
        let admin = viewer(Role::BusinessAdmin, 1, Some(1));
        let mut sub = feed.subscribe(&admin);
        assert_eq!(sub.current().len(), 1);
    }

    #[tokio::test]
    async fn test_publish_replaces_entire_set() {
        let feed = LeadFeed::new();
        let admin = viewer(Role::BusinessAdmin, 1, Some(1));
        let mut sub = feed.subscribe(&admin);

        feed.publish(BusinessId::new(1), vec![lead(1, 1, None), lead(2, 1, None)]);
        sub.changed().await.unwrap();
        assert_eq!(sub.current().len(), 2);

        // Second publish fully replaces the first, no merge
        feed.publish(BusinessId::new(1), vec![lead(3, 1, None)]);
        sub.changed().await.unwrap();
        let ids: Vec<i32> = sub.current().iter().map(|l| l.id.as_i32()).collect();
        assert_eq!(ids, vec![3]);
    }

    #[tokio::test]
    async fn test_agent_subscription_filters_updates() {
        let feed = LeadFeed::new();
        let agent = viewer(Role::Agent, 7, Some(1));
        let mut sub = feed.subscribe(&agent);

        feed.publish(
            BusinessId::new(1),
            vec![lead(1, 1, Some(7)), lead(2, 1, Some(8)), lead(3, 1, Some(7))],
        );
        sub.changed().await.unwrap();
        let ids: Vec<i32> = sub.current().iter().map(|l| l.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_empty_scope_subscription_yields_empty_then_ends() {
        let feed = LeadFeed::new();
        let unbound = viewer(Role::BusinessAdmin, 1, None);
        let mut sub = feed.subscribe(&unbound);

        assert!(sub.current().is_empty());
        // Sender side was dropped at creation, so the stream ends immediately
        assert!(sub.changed().await.is_err());
    }

    #[tokio::test]
    async fn test_dropping_subscription_deregisters() {
        let feed = LeadFeed::new();
        let admin = viewer(Role::BusinessAdmin, 1, Some(1));

        let sub = feed.subscribe(&admin);
        assert_eq!(feed.subscriber_count(BusinessId::new(1)), 1);

        drop(sub);
        assert_eq!(feed.subscriber_count(BusinessId::new(1)), 0);
    }

    #[tokio::test]
    async fn test_tenants_are_isolated() {
        let feed = LeadFeed::new();
        let admin_one = viewer(Role::BusinessAdmin, 1, Some(1));
        let mut sub = feed.subscribe(&admin_one);

        // A publish on another tenant's channel must not wake this viewer
        feed.publish(BusinessId::new(2), vec![lead(9, 2, None)]);
        assert!(sub.current().is_empty());
    }
}
