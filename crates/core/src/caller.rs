use serde::{Deserialize, Serialize};

use crate::collection::Collection;
use crate::role::Role;
use crate::types::DocumentId;

/// The single resolved identity attributed to an incoming request.
///
/// A request has at most one caller, even when the browser holds cookies
/// for several principal types at once. Modelled as a tagged union rather
/// than a loose `{role, collection}` pair so policy predicates get
/// exhaustiveness checking from the compiler.
///
/// Callers are derived per request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "collection")]
pub enum Caller {
    /// A `users`-collection principal; `role` is its stored role field.
    #[serde(rename = "users")]
    User {
        id: DocumentId,
        role: Role,
        email: Option<String>,
    },
    /// A `doctors`-collection principal. Role is always the literal "doctor".
    #[serde(rename = "doctors")]
    Doctor {
        id: DocumentId,
        email: Option<String>,
    },
    /// An `organisations`-collection principal. Role is always the literal
    /// "organisation".
    #[serde(rename = "organisations")]
    Organisation {
        id: DocumentId,
        email: Option<String>,
    },
}

impl Caller {
    /// The caller's document id within its own collection.
    #[must_use]
    pub fn id(&self) -> &DocumentId {
        match self {
            Self::User { id, .. } | Self::Doctor { id, .. } | Self::Organisation { id, .. } => id,
        }
    }

    /// The collection this caller authenticated against.
    #[must_use]
    pub fn collection(&self) -> Collection {
        match self {
            Self::User { .. } => Collection::Users,
            Self::Doctor { .. } => Collection::Doctors,
            Self::Organisation { .. } => Collection::Organisations,
        }
    }

    /// The effective role name: a user's stored role, or the collection
    /// literal for doctors and organisations.
    #[must_use]
    pub fn role_name(&self) -> &'static str {
        match self {
            Self::User { role, .. } => role.as_str(),
            Self::Doctor { .. } => "doctor",
            Self::Organisation { .. } => "organisation",
        }
    }

    /// Whether this caller is an admin-role user.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Self::User {
                role: Role::Admin,
                ..
            }
        )
    }

    /// Whether this caller is the principal identified by `id` in `collection`.
    #[must_use]
    pub fn is_self(&self, collection: Collection, id: &str) -> bool {
        self.collection() == collection && self.id().as_str() == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> Caller {
        Caller::User {
            id: DocumentId::new("3"),
            role,
            email: Some("a@b.c".to_owned()),
        }
    }

    #[test]
    fn role_name_is_forced_for_doctors_and_orgs() {
        let doctor = Caller::Doctor {
            id: DocumentId::new("9"),
            email: None,
        };
        let org = Caller::Organisation {
            id: DocumentId::new("7"),
            email: None,
        };
        assert_eq!(doctor.role_name(), "doctor");
        assert_eq!(org.role_name(), "organisation");
        assert_eq!(user(Role::Admin).role_name(), "admin");
        assert_eq!(user(Role::User).role_name(), "user");
    }

    #[test]
    fn only_admin_users_are_admin() {
        assert!(user(Role::Admin).is_admin());
        assert!(!user(Role::User).is_admin());
        assert!(
            !Caller::Organisation {
                id: DocumentId::new("7"),
                email: None,
            }
            .is_admin()
        );
    }

    #[test]
    fn self_check_requires_matching_collection() {
        let doctor = Caller::Doctor {
            id: DocumentId::new("9"),
            email: None,
        };
        assert!(doctor.is_self(Collection::Doctors, "9"));
        assert!(!doctor.is_self(Collection::Users, "9"));
        assert!(!doctor.is_self(Collection::Doctors, "10"));
    }

    #[test]
    fn serde_tags_with_collection() {
        let json = serde_json::to_value(user(Role::Admin)).unwrap();
        assert_eq!(json["collection"], "users");
        assert_eq!(json["role"], "admin");
    }
}
