//! Business logic services for the dashboard backend.

pub mod auth;
pub mod content;
pub mod leads;

pub use auth::{AuthError, AuthService};
pub use content::ContentScope;
pub use leads::{LeadFeed, LeadScope, LeadSubscription};
