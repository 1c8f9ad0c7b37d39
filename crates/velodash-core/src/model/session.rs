//! Authenticated sessions and the roles that gate navigation.

use secrecy::SecretString;

use velodash_api::types::SessionResponse;

/// Coarse role reported by the service with a session token.
///
/// Only used client-side to decide which navigation entries are visible;
/// the service enforces real authorization on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    /// Not signed in -- public screens only.
    #[default]
    Visitor,
    Staff,
    Admin,
}

impl Role {
    pub fn from_wire(role: &str) -> Self {
        match role.to_ascii_lowercase().as_str() {
            "admin" => Self::Admin,
            "staff" => Self::Staff,
            _ => Self::Visitor,
        }
    }

    /// Whether this role sees the administrative screens.
    pub fn is_staff(self) -> bool {
        matches!(self, Self::Staff | Self::Admin)
    }
}

/// An authenticated session. Held in memory only, never persisted.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: SecretString,
    pub role: Role,
    pub display_name: Option<String>,
}

impl From<SessionResponse> for Session {
    fn from(wire: SessionResponse) -> Self {
        Self {
            token: SecretString::from(wire.token),
            role: Role::from_wire(&wire.role),
            display_name: wire.display_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_roles_fall_back_to_visitor() {
        assert_eq!(Role::from_wire("ADMIN"), Role::Admin);
        assert_eq!(Role::from_wire("staff"), Role::Staff);
        assert_eq!(Role::from_wire("customer"), Role::Visitor);
        assert!(!Role::Visitor.is_staff());
        assert!(Role::Admin.is_staff());
    }
}
