//! User account bootstrap command.
//!
//! Platform admins have no self-serve registration path; they are created
//! here. Business admins and agents can also be created for test setups.

use bizgenie_core::{BusinessId, Role};
use bizgenie_server::services::AuthService;

use super::{CommandError, connect};

/// Create a user account.
///
/// # Errors
///
/// Returns `CommandError::Invalid` for an unknown role, a missing business
/// binding, or a rejected email/password.
pub async fn create(
    email: &str,
    name: &str,
    role: &str,
    password: &str,
    business: Option<i32>,
) -> Result<(), CommandError> {
    let role: Role = role
        .parse()
        .map_err(|e: String| CommandError::Invalid(e))?;

    let business_id = business.map(BusinessId::new);
    match role {
        Role::Agent if business_id.is_none() => {
            return Err(CommandError::Invalid(
                "agents must be bound to a business (--business)".to_string(),
            ));
        }
        Role::PlatformAdmin if business_id.is_some() => {
            return Err(CommandError::Invalid(
                "platform admins are not bound to a business".to_string(),
            ));
        }
        Role::PlatformAdmin | Role::BusinessAdmin | Role::Agent => {}
    }

    let pool = connect().await?;
    let user = AuthService::new(&pool)
        .create_account(name, email, password, role, business_id)
        .await
        .map_err(|e| CommandError::Invalid(e.to_string()))?;

    tracing::info!(id = %user.id, role = %user.role, "user created");
    Ok(())
}
