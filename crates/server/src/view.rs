//! View routing and the onboarding gate.
//!
//! A pure function from (session identity, requested tab) to one of a
//! fixed set of views. Three coarse states: signed out, awaiting
//! onboarding (business admin without a completed profile), and active
//! with a role-filtered tab.

use serde::{Deserialize, Serialize};

use bizgenie_core::Role;

use crate::models::session::CurrentUser;

/// A navigation tab inside the active dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    Dashboard,
    Leads,
    Content,
    Business,
    Team,
    Businesses,
}

impl Default for Tab {
    fn default() -> Self {
        Self::Dashboard
    }
}

/// The view the client should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "view", content = "tab", rename_all = "snake_case")]
pub enum View {
    /// Not authenticated: the sign-in screen.
    SignIn,
    /// Authenticated business admin whose tenant has not completed
    /// onboarding.
    Onboarding,
    /// Authenticated and onboarded: the dashboard with a selected tab.
    Active(Tab),
}

/// Resolve the view for a (possibly absent) session identity and a
/// requested tab.
///
/// A requested tab the role may not see is demoted to the dashboard
/// rather than rejected; tab availability is a visibility concern, not a
/// permission boundary (the data routes enforce those separately).
#[must_use]
pub fn resolve(identity: Option<&CurrentUser>, requested: Tab) -> View {
    let Some(user) = identity else {
        return View::SignIn;
    };

    match user.role {
        Role::BusinessAdmin if !user.onboarded => View::Onboarding,
        role => {
            if tabs_for(role).contains(&requested) {
                View::Active(requested)
            } else {
                View::Active(Tab::Dashboard)
            }
        }
    }
}

/// The tabs available to a role.
#[must_use]
pub const fn tabs_for(role: Role) -> &'static [Tab] {
    match role {
        Role::PlatformAdmin => &[Tab::Dashboard, Tab::Businesses],
        Role::BusinessAdmin => &[
            Tab::Dashboard,
            Tab::Leads,
            Tab::Content,
            Tab::Team,
            Tab::Business,
        ],
        Role::Agent => &[Tab::Dashboard, Tab::Leads, Tab::Content],
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bizgenie_core::{BusinessId, Email, UserId};

    fn identity(role: Role, onboarded: bool) -> CurrentUser {
        CurrentUser {
            id: UserId::new(1),
            email: Email::parse("owner@skyline.example").unwrap(),
            name: "Vikram".to_string(),
            role,
            business_id: Some(BusinessId::new(1)),
            onboarded,
        }
    }

    #[test]
    fn test_unauthenticated_resolves_to_sign_in() {
        assert_eq!(resolve(None, Tab::Leads), View::SignIn);
    }

    #[test]
    fn test_business_admin_without_profile_gets_onboarding_gate() {
        let user = identity(Role::BusinessAdmin, false);
        // Whatever tab is requested, the gate wins
        assert_eq!(resolve(Some(&user), Tab::Dashboard), View::Onboarding);
        assert_eq!(resolve(Some(&user), Tab::Leads), View::Onboarding);
    }

    #[test]
    fn test_onboarding_completion_unlocks_dashboard() {
        let before = identity(Role::BusinessAdmin, false);
        assert_eq!(resolve(Some(&before), Tab::Dashboard), View::Onboarding);

        let after = identity(Role::BusinessAdmin, true);
        assert_eq!(
            resolve(Some(&after), Tab::Dashboard),
            View::Active(Tab::Dashboard)
        );
    }

    #[test]
    fn test_agents_skip_the_onboarding_gate() {
        // Agents join an existing tenant; the gate only applies to owners
        let user = identity(Role::Agent, false);
        assert_eq!(
            resolve(Some(&user), Tab::Leads),
            View::Active(Tab::Leads)
        );
    }

    #[test]
    fn test_unavailable_tab_demotes_to_dashboard() {
        let agent = identity(Role::Agent, true);
        assert_eq!(
            resolve(Some(&agent), Tab::Businesses),
            View::Active(Tab::Dashboard)
        );
        assert_eq!(
            resolve(Some(&agent), Tab::Team),
            View::Active(Tab::Dashboard)
        );
    }

    #[test]
    fn test_manage_businesses_only_for_platform_admin() {
        let platform = identity(Role::PlatformAdmin, true);
        assert_eq!(
            resolve(Some(&platform), Tab::Businesses),
            View::Active(Tab::Businesses)
        );

        assert!(tabs_for(Role::PlatformAdmin).contains(&Tab::Businesses));
        assert!(!tabs_for(Role::BusinessAdmin).contains(&Tab::Businesses));
        assert!(!tabs_for(Role::Agent).contains(&Tab::Businesses));
    }

    #[test]
    fn test_platform_admin_sees_no_tenant_detail_tabs() {
        let tabs = tabs_for(Role::PlatformAdmin);
        assert!(!tabs.contains(&Tab::Leads));
        assert!(!tabs.contains(&Tab::Content));
        assert!(!tabs.contains(&Tab::Team));
        assert!(!tabs.contains(&Tab::Business));
    }

    #[test]
    fn test_every_role_has_a_dashboard() {
        for role in [Role::PlatformAdmin, Role::BusinessAdmin, Role::Agent] {
            assert!(tabs_for(role).contains(&Tab::Dashboard));
        }
    }
}
