//! HTTP route handlers for the dashboard backend.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                   - Liveness check
//! GET  /health/ready             - Readiness check (database)
//!
//! # Auth
//! POST /auth/register            - Register a business admin (signs in)
//! POST /auth/login               - Email/password login
//! POST /auth/logout              - Flush the session
//! GET  /auth/me                  - Current session identity
//!
//! # Navigation
//! GET  /nav                      - Resolve the view for the session + tab
//!
//! # Onboarding & profile
//! POST /onboarding               - Complete the business profile
//! GET  /profile                  - Tenant profile
//! PUT  /profile                  - Update profile fields
//! POST /profile/files            - Record uploaded-file references
//!
//! # Dashboard
//! GET  /dashboard                - Role-scoped headline metrics
//!
//! # Leads
//! GET  /leads                    - Scoped snapshot
//! GET  /leads/events             - Scoped live feed (SSE)
//! POST /leads                    - Capture a lead
//! PATCH /leads/{id}/status       - Move a lead along the pipeline
//! PATCH /leads/{id}/assign       - Assign a lead to an agent
//!
//! # Content studio
//! GET  /content                  - Scoped saved items
//! POST /content                  - Save a generated item as draft
//! PATCH /content/{id}/status     - Review workflow
//! PATCH /content/{id}/shared     - Team-wide visibility
//! POST /generate/text|image|audio|video - Generation operations
//!
//! # Team
//! GET  /team                     - Tenant roster
//! POST /team                     - Create an agent account
//!
//! # Platform administration
//! GET  /businesses               - Cross-tenant summaries (platform admin)
//! ```

use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod businesses;
pub mod content;
pub mod dashboard;
pub mod leads;
pub mod nav;
pub mod onboarding;
pub mod profile;
pub mod team;

/// Build the full application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(nav::router())
        .merge(onboarding::router())
        .merge(profile::router())
        .merge(dashboard::router())
        .merge(leads::router())
        .merge(content::router())
        .merge(team::router())
        .merge(businesses::router())
}
