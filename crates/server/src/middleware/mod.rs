//! HTTP middleware stack.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with `PostgreSQL` store)
//! 4. Auth extractors (per-route, in `auth`)

pub mod auth;
pub mod session;

pub use auth::{
    OptionalAuth, RequireAuth, RequireBusinessAdmin, RequirePlatformAdmin, RequireTenant,
    clear_session, set_current_user,
};
pub use session::create_session_layer;
