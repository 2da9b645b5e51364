//! Cross-tenant business administration route handlers.
//!
//! Platform-admin-only: aggregated summaries of every tenant. Tenant
//! record detail (leads, content, rosters) is never exposed here.

use axum::{Json, Router, extract::State, routing::get};

use crate::db::BusinessRepository;
use crate::error::AppError;
use crate::middleware::RequirePlatformAdmin;
use crate::models::BusinessSummary;
use crate::state::AppState;

/// Build the businesses router.
pub fn router() -> Router<AppState> {
    Router::new().route("/businesses", get(list))
}

/// Aggregated summaries for every tenant on the platform.
///
/// GET /businesses
async fn list(
    State(state): State<AppState>,
    RequirePlatformAdmin(_admin): RequirePlatformAdmin,
) -> Result<Json<Vec<BusinessSummary>>, AppError> {
    let summaries = BusinessRepository::new(state.pool()).summaries().await?;
    Ok(Json(summaries))
}
