use std::fmt;

use serde::{Deserialize, Serialize};

/// Role stored on a `users`-collection record.
///
/// This is the sole authorization axis for user principals. Doctor and
/// organisation principals live in their own collections and carry an
/// implied role (see [`crate::Caller`]); the `Doctor` variant here exists
/// because organisations may create doctor-typed user records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Doctor,
    Admin,
}

impl Role {
    /// Parse a role from a string, case-insensitively.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Self::User),
            "doctor" => Some(Self::Doctor),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Return the canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Doctor => "doctor",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Role::from_str_loose("Admin"), Some(Role::Admin));
        assert_eq!(Role::from_str_loose("USER"), Some(Role::User));
        assert_eq!(Role::from_str_loose("nurse"), None);
    }

    #[test]
    fn default_role_is_user() {
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let back: Role = serde_json::from_str("\"doctor\"").unwrap();
        assert_eq!(back, Role::Doctor);
    }
}
