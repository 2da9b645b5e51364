//! Session-related types for authentication.
//!
//! Types stored in the session to identify the logged-in user. The session
//! record is the only authentication state the server holds; it is created
//! at login and destroyed (flushed) at logout, which also drops the cached
//! onboarding flag and any view state.

use serde::{Deserialize, Serialize};

use bizgenie_core::{BusinessId, Email, Role, UserId};

use super::user::User;

/// Session-stored identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// User's display name.
    pub name: String,
    /// User's role.
    pub role: Role,
    /// Tenant this user belongs to, if any.
    pub business_id: Option<BusinessId>,
    /// Whether the user's business has completed onboarding.
    ///
    /// Only meaningful for business admins; refreshed when onboarding
    /// completes so the view gate observes it without a database read.
    pub onboarded: bool,
}

impl CurrentUser {
    /// Build the session identity from a domain user plus the tenant's
    /// onboarding state.
    #[must_use]
    pub fn from_user(user: &User, onboarded: bool) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            business_id: user.business_id,
            onboarded,
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
