//! Lead route handlers.
//!
//! Snapshot and live (SSE) reads over the role-scoped lead set, plus the
//! tenant mutations. Every mutation republishes the tenant's feed so live
//! subscribers see the whole-set replacement.

use std::convert::Infallible;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, patch},
};
use futures::Stream;
use serde::Deserialize;

use bizgenie_core::{LeadId, LeadSource, LeadStatus, Role, UserId};

use crate::db::LeadRepository;
use crate::error::AppError;
use crate::middleware::{RequireAuth, RequireTenant};
use crate::models::lead::{Lead, NewLead};
use crate::services::LeadScope;
use crate::state::AppState;

/// Build the leads router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/leads", get(list).post(create))
        .route("/leads/events", get(events))
        .route("/leads/{id}/status", patch(update_status))
        .route("/leads/{id}/assign", patch(assign))
}

/// New lead payload. Status and score are not caller-controlled.
#[derive(Debug, Deserialize)]
struct CreateLeadRequest {
    name: String,
    email: String,
    phone: String,
    source: LeadSource,
    requirements: Option<String>,
    assigned_to: Option<UserId>,
}

/// Status change payload.
#[derive(Debug, Deserialize)]
struct UpdateStatusRequest {
    status: LeadStatus,
}

/// Assignment payload; `None` unassigns.
#[derive(Debug, Deserialize)]
struct AssignRequest {
    assigned_to: Option<UserId>,
}

/// Snapshot of the viewer's visible lead set.
///
/// GET /leads
async fn list(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Lead>>, AppError> {
    let leads = LeadScope::for_viewer(&user).load(state.pool()).await?;
    Ok(Json(leads))
}

/// Live view of the visible lead set over server-sent events.
///
/// GET /leads/events
///
/// Emits the full scoped set immediately on subscribe (replay-latest) and
/// again on every replacement. The subscription ends when the client
/// disconnects, which drops the feed handle.
async fn events(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut subscription = state.lead_feed().subscribe(&user);

    // Prime the tenant channel from the database so the first emission is
    // fresh; on failure the last-known set is emitted instead.
    if let Some(business) = subscription.scope().business() {
        let _ = state.lead_feed().refresh(state.pool(), business).await;
    }

    let stream = async_stream::stream! {
        loop {
            let leads = subscription.current();
            match Event::default().event("leads").json_data(&leads) {
                Ok(event) => yield Ok(event),
                Err(e) => tracing::error!(error = %e, "failed to encode lead event"),
            }

            if subscription.changed().await.is_err() {
                break;
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Capture a new lead for the tenant.
///
/// POST /leads
async fn create(
    State(state): State<AppState>,
    tenant: RequireTenant,
    Json(payload): Json<CreateLeadRequest>,
) -> Result<(StatusCode, Json<Lead>), AppError> {
    let new_lead = NewLead {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        source: payload.source,
        requirements: payload.requirements,
        assigned_to: payload.assigned_to,
    };

    let lead = LeadRepository::new(state.pool())
        .insert(tenant.business_id, &new_lead)
        .await?;

    // Push the replacement set to live subscribers; a failed refresh only
    // delays them until the next one
    let _ = state
        .lead_feed()
        .refresh(state.pool(), tenant.business_id)
        .await;

    Ok((StatusCode::CREATED, Json(lead)))
}

/// Move a lead along the pipeline.
///
/// PATCH /leads/{id}/status
async fn update_status(
    State(state): State<AppState>,
    tenant: RequireTenant,
    Path(id): Path<LeadId>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<StatusCode, AppError> {
    LeadRepository::new(state.pool())
        .update_status(tenant.business_id, id, payload.status)
        .await?;

    let _ = state
        .lead_feed()
        .refresh(state.pool(), tenant.business_id)
        .await;

    Ok(StatusCode::NO_CONTENT)
}

/// Assign a lead to an agent (or unassign it).
///
/// PATCH /leads/{id}/assign
async fn assign(
    State(state): State<AppState>,
    tenant: RequireTenant,
    Path(id): Path<LeadId>,
    Json(payload): Json<AssignRequest>,
) -> Result<StatusCode, AppError> {
    match tenant.user.role {
        Role::BusinessAdmin => {}
        Role::PlatformAdmin | Role::Agent => {
            return Err(AppError::Forbidden(
                "only business admins can assign leads".to_string(),
            ));
        }
    }

    LeadRepository::new(state.pool())
        .assign(tenant.business_id, id, payload.assigned_to)
        .await?;

    let _ = state
        .lead_feed()
        .refresh(state.pool(), tenant.business_id)
        .await;

    Ok(StatusCode::NO_CONTENT)
}
