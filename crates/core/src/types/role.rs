//! User roles for authorization.

use serde::{Deserialize, Serialize};

/// Role of an authenticated identity.
///
/// This is a closed set: every authorization boundary matches on it
/// exhaustively, so adding a role forces each boundary to be revisited
/// before the crate compiles again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Cross-tenant operator. Sees aggregated business summaries,
    /// never tenant record detail.
    PlatformAdmin,
    /// Owner of a single business (tenant). Sees everything inside it.
    BusinessAdmin,
    /// Tenant team member. Sees only leads assigned to them and
    /// content they created or that was shared with the team.
    Agent,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlatformAdmin => write!(f, "platform_admin"),
            Self::BusinessAdmin => write!(f, "business_admin"),
            Self::Agent => write!(f, "agent"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "platform_admin" => Ok(Self::PlatformAdmin),
            "business_admin" => Ok(Self::BusinessAdmin),
            "agent" => Ok(Self::Agent),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_display_from_str_roundtrip() {
        for role in [Role::PlatformAdmin, Role::BusinessAdmin, Role::Agent] {
            let s = role.to_string();
            assert_eq!(Role::from_str(&s).unwrap(), role);
        }
    }

    #[test]
    fn test_role_from_str_rejects_unknown() {
        assert!(Role::from_str("super_admin").is_err());
        assert!(Role::from_str("").is_err());
    }

    #[test]
    fn test_role_serde_snake_case() {
        let json = serde_json::to_string(&Role::BusinessAdmin).unwrap();
        assert_eq!(json, "\"business_admin\"");

        let parsed: Role = serde_json::from_str("\"platform_admin\"").unwrap();
        assert_eq!(parsed, Role::PlatformAdmin);
    }
}
