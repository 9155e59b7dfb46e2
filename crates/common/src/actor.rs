//! Request context for the authenticated caller.
//!
//! The identity provider is external; it hands us a pre-validated identity
//! per request. Query and mutation functions take this context explicitly —
//! never ambient state — so the core stays testable without a request
//! harness.

use serde::{Deserialize, Serialize};

/// Platform role, as asserted by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Back-office administrator with moderation capability.
    Admin,
    /// Representative of a member organisation.
    CsoRep,
}

impl Role {
    /// Parse a role claim. Unknown values are rejected rather than
    /// defaulted.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "cso_rep" => Some(Self::CsoRep),
            _ => None,
        }
    }

    /// The wire representation of this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::CsoRep => "cso_rep",
        }
    }
}

/// The authenticated caller of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Stable user identifier from the identity provider.
    pub user_id: String,
    /// Platform role.
    pub role: Role,
    /// Organisation this user is affiliated with, if any.
    pub organisation_id: Option<String>,
}

impl Actor {
    /// Whether this actor may perform moderation actions.
    #[must_use]
    pub const fn can_moderate(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Whether this actor represents the given organisation.
    #[must_use]
    pub fn represents(&self, organisation_id: &str) -> bool {
        self.organisation_id.as_deref() == Some(organisation_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("cso_rep"), Some(Role::CsoRep));
        assert_eq!(Role::parse("superuser"), None);
    }

    #[test]
    fn test_only_admin_moderates() {
        let admin = Actor {
            user_id: "u1".to_string(),
            role: Role::Admin,
            organisation_id: None,
        };
        let rep = Actor {
            user_id: "u2".to_string(),
            role: Role::CsoRep,
            organisation_id: Some("org1".to_string()),
        };

        assert!(admin.can_moderate());
        assert!(!rep.can_moderate());
        assert!(rep.represents("org1"));
        assert!(!rep.represents("org2"));
    }
}
