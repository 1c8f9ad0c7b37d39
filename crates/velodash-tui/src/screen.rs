//! Screen identifiers and role-gated navigation.

use std::fmt;

use velodash_core::Role;

/// Identifies each primary screen, navigable by number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Home,
    Pricing,
    Reviews,
    Login,
    /// Administrative shell -- only listed for staff roles.
    Admin,
}

impl ScreenId {
    /// Screens visible to a given role, in tab order. The admin entry
    /// only appears once a staff login succeeded; the service still
    /// enforces authorization on every request.
    pub fn visible_for(role: Role) -> Vec<ScreenId> {
        let mut screens = vec![Self::Home, Self::Pricing, Self::Reviews, Self::Login];
        if role.is_staff() {
            screens.push(Self::Admin);
        }
        screens
    }

    /// Translation key for the tab label.
    pub fn label_key(self) -> &'static str {
        match self {
            Self::Home => "nav.home",
            Self::Pricing => "nav.pricing",
            Self::Reviews => "nav.reviews",
            Self::Login => "nav.login",
            Self::Admin => "nav.admin",
        }
    }

    /// Fallback label when the dictionary has no entry.
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Pricing => "Pricing",
            Self::Reviews => "Reviews",
            Self::Login => "Login",
            Self::Admin => "Admin",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_tab_is_hidden_from_visitors() {
        let visitor = ScreenId::visible_for(Role::Visitor);
        assert!(!visitor.contains(&ScreenId::Admin));

        let admin = ScreenId::visible_for(Role::Admin);
        assert!(admin.contains(&ScreenId::Admin));
        assert_eq!(admin.len(), visitor.len() + 1);
    }
}
