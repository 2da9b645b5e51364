//! Team roster route handlers.
//!
//! The tenant's user roster, plus agent account creation by the business
//! admin.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};

use bizgenie_core::{Role, UserId};

use crate::db::UserRepository;
use crate::error::AppError;
use crate::middleware::RequireTenant;
use crate::models::User;
use crate::services::AuthService;
use crate::state::AppState;

/// Build the team router.
pub fn router() -> Router<AppState> {
    Router::new().route("/team", get(list).post(create_agent))
}

/// A roster entry as returned to the client.
#[derive(Debug, Serialize)]
struct TeamMember {
    id: UserId,
    name: String,
    email: String,
    role: Role,
    avatar: char,
}

impl From<&User> for TeamMember {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.to_string(),
            role: user.role,
            avatar: user.avatar(),
        }
    }
}

/// Payload for creating an agent account.
#[derive(Debug, Deserialize)]
struct CreateAgentRequest {
    name: String,
    email: String,
    password: String,
}

/// The tenant's team roster.
///
/// GET /team
async fn list(
    State(state): State<AppState>,
    tenant: RequireTenant,
) -> Result<Json<Vec<TeamMember>>, AppError> {
    let members = UserRepository::new(state.pool())
        .list_by_business(tenant.business_id)
        .await?;

    Ok(Json(members.iter().map(TeamMember::from).collect()))
}

/// Create an agent account inside the tenant.
///
/// POST /team
async fn create_agent(
    State(state): State<AppState>,
    tenant: RequireTenant,
    Json(payload): Json<CreateAgentRequest>,
) -> Result<(StatusCode, Json<TeamMember>), AppError> {
    match tenant.user.role {
        Role::BusinessAdmin => {}
        Role::PlatformAdmin | Role::Agent => {
            return Err(AppError::Forbidden(
                "only business admins can add team members".to_string(),
            ));
        }
    }

    let agent = AuthService::new(state.pool())
        .register_agent(
            tenant.business_id,
            &payload.name,
            &payload.email,
            &payload.password,
        )
        .await?;

    tracing::info!(agent = %agent.id, business = %tenant.business_id, "agent account created");

    Ok((StatusCode::CREATED, Json(TeamMember::from(&agent))))
}
