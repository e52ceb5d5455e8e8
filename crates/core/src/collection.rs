use std::fmt;

use serde::{Deserialize, Serialize};

/// The document collections the marketplace stores.
///
/// The first three are auth collections: each can authenticate on its own
/// and carries its own session cookie. `DoctorCategories` and `Media` are
/// plain content collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum Collection {
    Users,
    Doctors,
    Organisations,
    DoctorCategories,
    Media,
}

impl Collection {
    /// Auth collections in resolution priority order: when a browser holds
    /// cookies for more than one principal type, the first collection in
    /// this list whose cookie decodes wins.
    pub const AUTH_PRIORITY: [Self; 3] = [Self::Users, Self::Doctors, Self::Organisations];

    /// Return the collection slug used in URLs and stored documents.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Doctors => "doctors",
            Self::Organisations => "organisations",
            Self::DoctorCategories => "doctor-categories",
            Self::Media => "media",
        }
    }

    /// Parse a collection from its slug.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s {
            "users" => Some(Self::Users),
            "doctors" => Some(Self::Doctors),
            "organisations" => Some(Self::Organisations),
            "doctor-categories" => Some(Self::DoctorCategories),
            "media" => Some(Self::Media),
            _ => None,
        }
    }

    /// The session cookie name for an auth collection, `None` for content
    /// collections that cannot authenticate.
    #[must_use]
    pub fn cookie_name(self) -> Option<&'static str> {
        match self {
            Self::Users => Some("users-token"),
            Self::Doctors => Some("doctors-token"),
            Self::Organisations => Some("organisations-token"),
            Self::DoctorCategories | Self::Media => None,
        }
    }

    /// Whether records in this collection hold credentials and can log in.
    #[must_use]
    pub fn is_auth(self) -> bool {
        self.cookie_name().is_some()
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_roundtrip() {
        for c in [
            Collection::Users,
            Collection::Doctors,
            Collection::Organisations,
            Collection::DoctorCategories,
            Collection::Media,
        ] {
            assert_eq!(Collection::from_str_loose(c.as_str()), Some(c));
        }
        assert_eq!(Collection::from_str_loose("patients"), None);
    }

    #[test]
    fn only_auth_collections_have_cookies() {
        assert_eq!(Collection::Users.cookie_name(), Some("users-token"));
        assert_eq!(Collection::Doctors.cookie_name(), Some("doctors-token"));
        assert_eq!(
            Collection::Organisations.cookie_name(),
            Some("organisations-token")
        );
        assert!(Collection::DoctorCategories.cookie_name().is_none());
        assert!(Collection::Media.cookie_name().is_none());
    }

    #[test]
    fn priority_puts_users_first() {
        assert_eq!(Collection::AUTH_PRIORITY[0], Collection::Users);
        assert_eq!(Collection::AUTH_PRIORITY[2], Collection::Organisations);
    }
}
