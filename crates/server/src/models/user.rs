//! User domain types.

use chrono::{DateTime, Utc};

use bizgenie_core::{BusinessId, Email, Role, UserId};

/// An authenticated identity (domain type).
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// User's display name.
    pub name: String,
    /// User's role.
    pub role: Role,
    /// Tenant this user belongs to. Platform admins have none.
    pub business_id: Option<BusinessId>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Display avatar: the uppercased first initial of the name.
    ///
    /// Derived rather than stored; falls back to `'U'` for empty names.
    #[must_use]
    pub fn avatar(&self) -> char {
        self.name
            .chars()
            .next()
            .map_or('U', |c| c.to_ascii_uppercase())
    }
}
