//! Navigation route handler.
//!
//! Exposes the view state machine: given the session identity and a
//! requested tab, returns the view the client should render and the tabs
//! available to the role.

use axum::{Json, Router, extract::Query, routing::get};
use serde::{Deserialize, Serialize};

use crate::middleware::OptionalAuth;
use crate::state::AppState;
use crate::view::{self, Tab, View};

/// Build the navigation router.
pub fn router() -> Router<AppState> {
    Router::new().route("/nav", get(nav))
}

/// Query parameters for the navigation endpoint.
#[derive(Debug, Deserialize)]
struct NavQuery {
    /// The tab the client wants to show; defaults to the dashboard.
    tab: Option<Tab>,
}

/// Navigation state returned to the client.
#[derive(Debug, Serialize)]
struct NavResponse {
    #[serde(flatten)]
    view: View,
    /// Tabs the current role may navigate to; empty when signed out.
    tabs: Vec<Tab>,
}

/// Resolve the current view.
///
/// GET /nav?tab=leads
async fn nav(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<NavQuery>,
) -> Json<NavResponse> {
    let requested = query.tab.unwrap_or_default();
    let view = view::resolve(user.as_ref(), requested);
    let tabs = user
        .as_ref()
        .map(|u| view::tabs_for(u.role).to_vec())
        .unwrap_or_default();

    Json(NavResponse { view, tabs })
}
