//! Authentication middleware and extractors.
//!
//! Provides extractors that gate route handlers on authentication, role,
//! and tenant/onboarding state. Each role check is an exhaustive match so
//! a new role cannot compile without being handled at every boundary.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use bizgenie_core::{BusinessId, Role};

use crate::error::AppError;
use crate::models::{CurrentUser, session_keys};

/// Read the current user from the request's session.
async fn current_user_from_parts(parts: &Parts) -> Option<CurrentUser> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
}

/// Extractor that requires an authenticated user.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_user_from_parts(parts)
            .await
            .map(Self)
            .ok_or_else(|| AppError::Unauthorized("not signed in".to_string()))
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this does not reject the request when nobody is
/// signed in.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(current_user_from_parts(parts).await))
    }
}

/// Extractor that requires a platform admin.
pub struct RequirePlatformAdmin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequirePlatformAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(user) = RequireAuth::from_request_parts(parts, state).await?;

        match user.role {
            Role::PlatformAdmin => Ok(Self(user)),
            Role::BusinessAdmin | Role::Agent => Err(AppError::Forbidden(
                "only platform admins can access this resource".to_string(),
            )),
        }
    }
}

/// Extractor that requires a business admin.
pub struct RequireBusinessAdmin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireBusinessAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(user) = RequireAuth::from_request_parts(parts, state).await?;

        match user.role {
            Role::BusinessAdmin => Ok(Self(user)),
            Role::PlatformAdmin | Role::Agent => Err(AppError::Forbidden(
                "only business admins can access this resource".to_string(),
            )),
        }
    }
}

/// Extractor for tenant-scoped routes: the current user plus their tenant.
///
/// Rejects viewers with no tenant binding and applies the onboarding gate
/// to business admins whose profile is incomplete.
pub struct RequireTenant {
    pub user: CurrentUser,
    pub business_id: BusinessId,
}

impl<S> FromRequestParts<S> for RequireTenant
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(user) = RequireAuth::from_request_parts(parts, state).await?;

        let Some(business_id) = user.business_id else {
            return Err(AppError::Forbidden(
                "no business is associated with this account".to_string(),
            ));
        };

        match user.role {
            Role::BusinessAdmin if !user.onboarded => Err(AppError::Forbidden(
                "complete onboarding first".to_string(),
            )),
            Role::BusinessAdmin | Role::Agent | Role::PlatformAdmin => {
                Ok(Self { user, business_id })
            }
        }
    }
}

/// Helper to set the current user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the whole session (logout).
///
/// Flushing drops the identity along with any cached view/profile state,
/// resetting the client to the unauthenticated default.
///
/// # Errors
///
/// Returns an error if the session store cannot be reached.
pub async fn clear_session(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
