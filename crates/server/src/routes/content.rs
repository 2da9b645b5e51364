//! Content studio route handlers.
//!
//! Role-scoped reads over saved content, draft management, and the four
//! generation endpoints. Generation is stateless: nothing is persisted
//! until the client explicitly saves a result, and a failed generation
//! leaves any previously saved items untouched.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
};
use serde::{Deserialize, Serialize};

use bizgenie_core::{ContentItemId, ContentStatus, ContentType, Role};

use crate::db::ContentRepository;
use crate::error::AppError;
use crate::middleware::{RequireAuth, RequireTenant};
use crate::models::content::{ContentItem, NewContentItem};
use crate::services::ContentScope;
use crate::state::AppState;

/// Build the content router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/content", get(list).post(save))
        .route("/content/{id}/status", patch(update_status))
        .route("/content/{id}/shared", patch(set_shared))
        .route("/generate/text", post(generate_text))
        .route("/generate/image", post(generate_image))
        .route("/generate/audio", post(generate_audio))
        .route("/generate/video", post(generate_video))
}

// =============================================================================
// Saved content
// =============================================================================

/// Payload for saving a generated item.
#[derive(Debug, Deserialize)]
struct SaveContentRequest {
    title: String,
    content_type: ContentType,
    data: String,
    #[serde(default)]
    shared: bool,
}

/// Status change payload.
#[derive(Debug, Deserialize)]
struct UpdateStatusRequest {
    status: ContentStatus,
}

/// Shared flag payload.
#[derive(Debug, Deserialize)]
struct SetSharedRequest {
    shared: bool,
}

/// List the content items visible to the viewer.
///
/// GET /content
async fn list(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<ContentItem>>, AppError> {
    let items = ContentScope::for_viewer(&user).load(state.pool()).await?;
    Ok(Json(items))
}

/// Save a generated item as a draft.
///
/// POST /content
async fn save(
    State(state): State<AppState>,
    tenant: RequireTenant,
    Json(payload): Json<SaveContentRequest>,
) -> Result<(StatusCode, Json<ContentItem>), AppError> {
    let new_item = NewContentItem {
        title: payload.title,
        content_type: payload.content_type,
        data: payload.data,
        shared: payload.shared,
    };

    let item = ContentRepository::new(state.pool())
        .insert(tenant.business_id, tenant.user.id, &new_item)
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Move an item through the review workflow.
///
/// PATCH /content/{id}/status
async fn update_status(
    State(state): State<AppState>,
    tenant: RequireTenant,
    Path(id): Path<ContentItemId>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<StatusCode, AppError> {
    require_business_admin(&tenant, "only business admins can review content")?;

    ContentRepository::new(state.pool())
        .update_status(tenant.business_id, id, payload.status)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Toggle team-wide visibility of an item.
///
/// PATCH /content/{id}/shared
async fn set_shared(
    State(state): State<AppState>,
    tenant: RequireTenant,
    Path(id): Path<ContentItemId>,
    Json(payload): Json<SetSharedRequest>,
) -> Result<StatusCode, AppError> {
    require_business_admin(&tenant, "only business admins can share content")?;

    ContentRepository::new(state.pool())
        .set_shared(tenant.business_id, id, payload.shared)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

fn require_business_admin(tenant: &RequireTenant, message: &str) -> Result<(), AppError> {
    match tenant.user.role {
        Role::BusinessAdmin => Ok(()),
        Role::PlatformAdmin | Role::Agent => Err(AppError::Forbidden(message.to_string())),
    }
}

// =============================================================================
// Generation
// =============================================================================

/// Text generation payload.
#[derive(Debug, Deserialize)]
struct GenerateTextRequest {
    prompt: String,
    system_instruction: Option<String>,
}

/// Prompt-only payload for image and video generation.
#[derive(Debug, Deserialize)]
struct PromptRequest {
    prompt: String,
}

/// Speech synthesis payload.
#[derive(Debug, Deserialize)]
struct GenerateAudioRequest {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeneratedText {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeneratedImage {
    /// Data URI, or null when the provider returned no image part.
    data_uri: Option<String>,
}

#[derive(Debug, Serialize)]
struct GeneratedAudio {
    /// Raw base64 payload; the client wraps it in a playable data URI.
    audio: String,
}

#[derive(Debug, Serialize)]
struct GeneratedVideo {
    /// Signed URI with the credential parameter appended.
    uri: String,
}

/// Generate marketing copy.
///
/// POST /generate/text
async fn generate_text(
    State(state): State<AppState>,
    _tenant: RequireTenant,
    Json(payload): Json<GenerateTextRequest>,
) -> Result<Json<GeneratedText>, AppError> {
    let text = state
        .gemini()
        .generate_text(&payload.prompt, payload.system_instruction.as_deref())
        .await?;

    Ok(Json(GeneratedText { text }))
}

/// Generate an image.
///
/// POST /generate/image
///
/// A provider response with no image part yields `data_uri: null` with
/// status 200; only transport/API failures are errors.
async fn generate_image(
    State(state): State<AppState>,
    _tenant: RequireTenant,
    Json(payload): Json<PromptRequest>,
) -> Result<Json<GeneratedImage>, AppError> {
    let data_uri = state.gemini().generate_image(&payload.prompt).await?;
    Ok(Json(GeneratedImage { data_uri }))
}

/// Synthesize speech.
///
/// POST /generate/audio
async fn generate_audio(
    State(state): State<AppState>,
    _tenant: RequireTenant,
    Json(payload): Json<GenerateAudioRequest>,
) -> Result<Json<GeneratedAudio>, AppError> {
    let audio = state.gemini().generate_audio(&payload.text).await?;
    Ok(Json(GeneratedAudio { audio }))
}

/// Generate a video (long-running; the request blocks through the bounded
/// poll).
///
/// POST /generate/video
async fn generate_video(
    State(state): State<AppState>,
    _tenant: RequireTenant,
    Json(payload): Json<PromptRequest>,
) -> Result<Json<GeneratedVideo>, AppError> {
    // Child of the server shutdown token: a draining server cancels the
    // poll between attempts
    let cancel = state.shutdown().child_token();
    let uri = state
        .gemini()
        .generate_video(&payload.prompt, &cancel)
        .await?;

    Ok(Json(GeneratedVideo { uri }))
}
