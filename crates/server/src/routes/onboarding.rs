//! Onboarding route handler.
//!
//! Completes a business admin's tenant profile, moving the view state from
//! awaiting-onboarding to the active dashboard.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::AppError;
use crate::middleware::{RequireBusinessAdmin, set_current_user};
use crate::models::business::{BusinessProfile, ProfileFields};
use crate::db::BusinessRepository;
use crate::state::AppState;
use crate::view::{Tab, View};

/// Build the onboarding router.
pub fn router() -> Router<AppState> {
    Router::new().route("/onboarding", post(complete))
}

/// Onboarding form payload.
#[derive(Debug, Deserialize)]
struct OnboardingRequest {
    name: String,
    industry: String,
    description: String,
}

/// Result of completing onboarding: the stored profile and the view to
/// transition to.
#[derive(Debug, Serialize)]
struct OnboardingResponse {
    profile: BusinessProfile,
    #[serde(flatten)]
    view: View,
}

/// Complete onboarding for the current business admin.
///
/// POST /onboarding
async fn complete(
    State(state): State<AppState>,
    session: Session,
    RequireBusinessAdmin(user): RequireBusinessAdmin,
    Json(payload): Json<OnboardingRequest>,
) -> Result<Json<OnboardingResponse>, AppError> {
    let business_id = user
        .business_id
        .ok_or_else(|| AppError::Internal("business admin without a tenant".to_string()))?;

    let fields = ProfileFields {
        name: payload.name,
        industry: payload.industry,
        description: payload.description,
    };
    let profile = BusinessRepository::new(state.pool())
        .complete_onboarding(business_id, &fields)
        .await?;

    // Refresh the cached onboarding flag so the view gate opens
    let mut updated = user;
    updated.onboarded = true;
    set_current_user(&session, &updated)
        .await
        .map_err(|e| AppError::Internal(format!("failed to write session: {e}")))?;

    tracing::info!(business = %business_id, "onboarding completed");

    Ok(Json(OnboardingResponse {
        profile,
        view: View::Active(Tab::Dashboard),
    }))
}
