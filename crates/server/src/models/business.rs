//! Business (tenant) domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bizgenie_core::{BusinessId, BusinessStatus, SubscriptionPlan, UserId};

/// A business profile (domain type). One per tenant.
///
/// Created empty when the owning business admin registers; the profile
/// fields are filled in and `onboarded` flips when onboarding completes.
#[derive(Debug, Clone, Serialize)]
pub struct BusinessProfile {
    /// Unique business ID.
    pub id: BusinessId,
    /// Business display name.
    pub name: String,
    /// Industry label.
    pub industry: String,
    /// Free-text description used to ground AI generation.
    pub description: String,
    /// References to uploaded files (names only; blobs live in external storage).
    pub uploaded_files: Vec<String>,
    /// Subscription plan.
    pub plan: SubscriptionPlan,
    /// Operational status.
    pub status: BusinessStatus,
    /// Whether onboarding has been completed.
    pub onboarded: bool,
    /// Owning business admin, once known.
    pub owner_id: Option<UserId>,
    /// When the tenant was created.
    pub created_at: DateTime<Utc>,
}

/// Profile fields captured by the onboarding form.
#[derive(Debug, Clone)]
pub struct ProfileFields {
    pub name: String,
    pub industry: String,
    pub description: String,
}

/// Aggregated cross-tenant read-model, visible to platform admins only.
///
/// Carries counts and plan/status, never tenant record detail.
#[derive(Debug, Clone, Serialize)]
pub struct BusinessSummary {
    /// Business ID.
    pub id: BusinessId,
    /// Business display name.
    pub name: String,
    /// Industry label.
    pub industry: String,
    /// Owner's display name, if an owner is recorded.
    pub owner_name: Option<String>,
    /// Owner's email, if an owner is recorded.
    pub owner_email: Option<String>,
    /// Number of agent accounts in the tenant.
    pub agent_count: i64,
    /// Subscription plan.
    pub plan: SubscriptionPlan,
    /// Operational status.
    pub status: BusinessStatus,
    /// Total leads captured by the tenant.
    pub total_leads: i64,
    /// When the tenant joined.
    pub joined_at: DateTime<Utc>,
}
