//! Business profile route handlers.
//!
//! Read and update the tenant profile, and record uploaded-file
//! references. File blobs themselves live in external storage; only the
//! names are tracked here.

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use bizgenie_core::Role;

use crate::db::BusinessRepository;
use crate::error::AppError;
use crate::middleware::RequireTenant;
use crate::models::business::{BusinessProfile, ProfileFields};
use crate::state::AppState;

/// Build the profile router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(show).put(update))
        .route("/profile/files", post(upload_files))
}

/// Profile update payload.
#[derive(Debug, Deserialize)]
struct UpdateProfileRequest {
    name: String,
    industry: String,
    description: String,
}

/// Names of files recorded by an upload.
#[derive(Debug, Serialize)]
struct UploadResponse {
    stored: Vec<String>,
}

/// Fetch the tenant profile.
///
/// GET /profile
async fn show(
    State(state): State<AppState>,
    tenant: RequireTenant,
) -> Result<Json<BusinessProfile>, AppError> {
    let profile = BusinessRepository::new(state.pool())
        .get(tenant.business_id)
        .await?
        .ok_or_else(|| AppError::NotFound("business profile".to_string()))?;

    Ok(Json(profile))
}

/// Update the tenant profile fields.
///
/// PUT /profile
async fn update(
    State(state): State<AppState>,
    tenant: RequireTenant,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<BusinessProfile>, AppError> {
    require_business_admin(&tenant)?;

    let fields = ProfileFields {
        name: payload.name,
        industry: payload.industry,
        description: payload.description,
    };
    let profile = BusinessRepository::new(state.pool())
        .update_profile(tenant.business_id, &fields)
        .await?;

    Ok(Json(profile))
}

/// Record uploaded knowledge files on the tenant.
///
/// POST /profile/files (multipart)
async fn upload_files(
    State(state): State<AppState>,
    tenant: RequireTenant,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    require_business_admin(&tenant)?;

    let repo = BusinessRepository::new(state.pool());
    let mut stored = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart payload: {e}")))?
    {
        let Some(file_name) = field.file_name().map(ToString::to_string) else {
            continue;
        };

        // Drain the field; the payload goes to external storage, only the
        // reference is kept
        let _ = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("failed to read upload: {e}")))?;

        repo.add_uploaded_file(tenant.business_id, &file_name)
            .await?;
        stored.push(file_name);
    }

    if stored.is_empty() {
        return Err(AppError::BadRequest("no files in upload".to_string()));
    }

    Ok((StatusCode::CREATED, Json(UploadResponse { stored })))
}

/// Profile mutation is an owner-only operation.
fn require_business_admin(tenant: &RequireTenant) -> Result<(), AppError> {
    match tenant.user.role {
        Role::BusinessAdmin => Ok(()),
        Role::PlatformAdmin | Role::Agent => Err(AppError::Forbidden(
            "only the business admin can modify the profile".to_string(),
        )),
    }
}
