//! Authentication route handlers.
//!
//! Email/password registration, login, logout, and the current-identity
//! endpoint. A successful login or registration writes exactly one session
//! record; logout flushes it.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use bizgenie_core::{BusinessId, Role, UserId};

use crate::db::BusinessRepository;
use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::{RequireAuth, clear_session, set_current_user};
use crate::models::{CurrentUser, User};
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

/// Registration payload.
#[derive(Debug, Deserialize)]
struct RegisterRequest {
    name: String,
    email: String,
    password: String,
    /// Defaults to business admin; the only self-registerable role.
    role: Option<Role>,
}

/// Login payload.
#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

/// The session identity as returned to the client.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub business_id: Option<BusinessId>,
    pub onboarded: bool,
    pub avatar: char,
}

impl From<&CurrentUser> for SessionResponse {
    fn from(user: &CurrentUser) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.to_string(),
            role: user.role,
            business_id: user.business_id,
            onboarded: user.onboarded,
            avatar: user
                .name
                .chars()
                .next()
                .map_or('U', |c| c.to_ascii_uppercase()),
        }
    }
}

/// Register a new account.
///
/// POST /auth/register
///
/// Only business admin accounts are self-registerable; agents are created
/// by their admin through the team routes and platform admins through the
/// CLI. Registration signs the new account in.
async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let role = payload.role.unwrap_or(Role::BusinessAdmin);

    let (user, business) = match role {
        Role::BusinessAdmin => {
            AuthService::new(state.pool())
                .register_business_admin(&payload.name, &payload.email, &payload.password)
                .await?
        }
        Role::Agent | Role::PlatformAdmin => {
            return Err(AppError::Auth(AuthError::RoleNotRegisterable));
        }
    };

    let current = CurrentUser::from_user(&user, business.onboarded);
    set_current_user(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("failed to write session: {e}")))?;
    set_sentry_user(user.id.as_i32(), Some(user.email.as_str()));

    tracing::info!(user = %user.id, business = %business.id, "registered new business admin");

    Ok((StatusCode::CREATED, Json(SessionResponse::from(&current))))
}

/// Login with email and password.
///
/// POST /auth/login
///
/// Bad credentials yield 401 with "invalid credentials" and no session is
/// written.
async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let user = AuthService::new(state.pool())
        .login(&payload.email, &payload.password)
        .await?;

    let current = session_identity(&state, &user).await?;
    set_current_user(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("failed to write session: {e}")))?;
    set_sentry_user(user.id.as_i32(), Some(user.email.as_str()));

    Ok(Json(SessionResponse::from(&current)))
}

/// Logout and clear the session.
///
/// POST /auth/logout
///
/// Flushing the session resets view state and the cached onboarding flag
/// along with the identity.
async fn logout(session: Session) -> Result<StatusCode, AppError> {
    clear_session(&session)
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;
    clear_sentry_user();

    Ok(StatusCode::NO_CONTENT)
}

/// The current session identity.
///
/// GET /auth/me
async fn me(RequireAuth(user): RequireAuth) -> Json<SessionResponse> {
    Json(SessionResponse::from(&user))
}

/// Build the session identity for a user, looking up the tenant's
/// onboarding state.
async fn session_identity(state: &AppState, user: &User) -> Result<CurrentUser, AppError> {
    let onboarded = match user.business_id {
        Some(business_id) => BusinessRepository::new(state.pool())
            .get(business_id)
            .await?
            .is_some_and(|b| b.onboarded),
        None => false,
    };

    Ok(CurrentUser::from_user(user, onboarded))
}
