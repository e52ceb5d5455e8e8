//! Access policy evaluation: one pure predicate per (resource, operation).
//!
//! Every predicate consumes the resolved caller (`None` = anonymous) and,
//! where relevant, the target document id, and returns allow/deny. No
//! predicate performs I/O; matches over [`Caller`] are exhaustive so a new
//! principal type cannot be forgotten silently.
//!
//! Reads are open everywhere and have no predicates.

use medway_core::{Caller, Collection, Role};

fn is_admin(caller: Option<&Caller>) -> bool {
    caller.is_some_and(Caller::is_admin)
}

fn is_organisation(caller: Option<&Caller>) -> bool {
    matches!(caller, Some(Caller::Organisation { .. }))
}

/// Doctor-category policies: write access is admin-only.
pub mod categories {
    use super::{Caller, is_admin};

    pub fn create(caller: Option<&Caller>) -> bool {
        is_admin(caller)
    }

    pub fn update(caller: Option<&Caller>) -> bool {
        is_admin(caller)
    }

    pub fn delete(caller: Option<&Caller>) -> bool {
        is_admin(caller)
    }
}

/// User-collection policies.
pub mod users {
    use super::{Caller, Collection, Role, is_admin, is_organisation};

    /// Admins may create any user; organisations may create users too,
    /// but only doctor-typed ones (see [`create_with_role`]).
    pub fn create(caller: Option<&Caller>) -> bool {
        is_admin(caller) || is_organisation(caller)
    }

    /// Creation combined with the declared role of the new record: an
    /// organisation cannot mint admin or plain-user accounts.
    pub fn create_with_role(caller: Option<&Caller>, requested: Role) -> bool {
        match caller {
            Some(Caller::User { role, .. }) => *role == Role::Admin,
            Some(Caller::Organisation { .. }) => requested == Role::Doctor,
            Some(Caller::Doctor { .. }) | None => false,
        }
    }

    /// Admin, or the user acting on themselves.
    pub fn update(caller: Option<&Caller>, target_id: &str) -> bool {
        match caller {
            Some(c @ Caller::User { role, .. }) => {
                *role == Role::Admin || c.is_self(Collection::Users, target_id)
            }
            Some(Caller::Doctor { .. } | Caller::Organisation { .. }) | None => false,
        }
    }

    pub fn delete(caller: Option<&Caller>) -> bool {
        is_admin(caller)
    }

    pub fn admin_panel(caller: Option<&Caller>) -> bool {
        is_admin(caller)
    }
}

/// Doctor-collection policies.
pub mod doctors {
    use super::{Caller, Collection, is_admin, is_organisation};

    pub fn create(caller: Option<&Caller>) -> bool {
        is_admin(caller) || is_organisation(caller)
    }

    /// Admin, the doctor acting on themselves, or an organisation.
    /// Narrowing an organisation to its own doctors is a query-filter
    /// concern, not a predicate concern.
    pub fn update(caller: Option<&Caller>, target_id: &str) -> bool {
        match caller {
            Some(Caller::User { .. }) => is_admin(caller),
            Some(c @ Caller::Doctor { .. }) => c.is_self(Collection::Doctors, target_id),
            Some(Caller::Organisation { .. }) => true,
            None => false,
        }
    }

    pub fn delete(caller: Option<&Caller>) -> bool {
        is_admin(caller)
    }

    /// Doctors never see the management UI.
    pub fn admin_panel(_caller: Option<&Caller>) -> bool {
        false
    }
}

/// Organisation-collection policies.
pub mod organisations {
    use super::{Caller, Collection, Role, is_admin};

    pub fn create(caller: Option<&Caller>) -> bool {
        is_admin(caller)
    }

    /// Admin, or the organisation acting on itself.
    pub fn update(caller: Option<&Caller>, target_id: &str) -> bool {
        match caller {
            Some(Caller::User { role, .. }) => *role == Role::Admin,
            Some(c @ Caller::Organisation { .. }) => {
                c.is_self(Collection::Organisations, target_id)
            }
            Some(Caller::Doctor { .. }) | None => false,
        }
    }

    pub fn delete(caller: Option<&Caller>) -> bool {
        is_admin(caller)
    }

    /// Organisations never see the management UI.
    pub fn admin_panel(_caller: Option<&Caller>) -> bool {
        false
    }
}

/// Media policies: organisations manage their doctors' photos, admins
/// manage everything; deletion stays admin-only.
pub mod media {
    use super::{Caller, is_admin, is_organisation};

    pub fn create(caller: Option<&Caller>) -> bool {
        is_admin(caller) || is_organisation(caller)
    }

    pub fn update(caller: Option<&Caller>) -> bool {
        is_admin(caller) || is_organisation(caller)
    }

    pub fn delete(caller: Option<&Caller>) -> bool {
        is_admin(caller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medway_core::DocumentId;

    fn admin() -> Caller {
        Caller::User {
            id: DocumentId::new("1"),
            role: Role::Admin,
            email: None,
        }
    }

    fn user(id: &str) -> Caller {
        Caller::User {
            id: DocumentId::new(id),
            role: Role::User,
            email: None,
        }
    }

    fn doctor(id: &str) -> Caller {
        Caller::Doctor {
            id: DocumentId::new(id),
            email: None,
        }
    }

    fn organisation(id: &str) -> Caller {
        Caller::Organisation {
            id: DocumentId::new(id),
            email: None,
        }
    }

    #[test]
    fn category_writes_are_admin_only() {
        assert!(categories::create(Some(&admin())));
        assert!(!categories::create(Some(&doctor("9"))));
        assert!(!categories::create(Some(&organisation("7"))));
        assert!(!categories::create(Some(&user("2"))));
        assert!(!categories::create(None));
        assert!(!categories::delete(Some(&user("2"))));
        assert!(categories::update(Some(&admin())));
    }

    #[test]
    fn self_update_allowed_for_every_principal_type() {
        assert!(users::update(Some(&user("5")), "5"));
        assert!(!users::update(Some(&user("5")), "6"));
        assert!(users::update(Some(&admin()), "6"));

        assert!(doctors::update(Some(&doctor("9")), "9"));
        assert!(!doctors::update(Some(&doctor("9")), "10"));

        assert!(organisations::update(Some(&organisation("7")), "7"));
        assert!(!organisations::update(Some(&organisation("7")), "8"));
    }

    #[test]
    fn cross_collection_ids_do_not_grant_self_access() {
        // A doctor whose id collides with a user id is still not that user.
        assert!(!users::update(Some(&doctor("5")), "5"));
        assert!(!organisations::update(Some(&doctor("7")), "7"));
    }

    #[test]
    fn organisations_create_only_doctor_users() {
        let org = organisation("7");
        assert!(users::create_with_role(Some(&org), Role::Doctor));
        assert!(!users::create_with_role(Some(&org), Role::User));
        assert!(!users::create_with_role(Some(&org), Role::Admin));
        assert!(users::create_with_role(Some(&admin()), Role::Admin));
        assert!(!users::create_with_role(Some(&doctor("9")), Role::Doctor));
        assert!(!users::create_with_role(None, Role::Doctor));
    }

    #[test]
    fn doctor_creation_allowed_for_admin_and_organisations() {
        assert!(doctors::create(Some(&admin())));
        assert!(doctors::create(Some(&organisation("7"))));
        assert!(!doctors::create(Some(&doctor("9"))));
        assert!(!doctors::create(Some(&user("2"))));
        assert!(!doctors::create(None));
    }

    #[test]
    fn organisations_may_update_any_doctor_at_predicate_level() {
        assert!(doctors::update(Some(&organisation("7")), "9"));
    }

    #[test]
    fn deletes_are_admin_only_everywhere() {
        for caller in [user("2"), doctor("9"), organisation("7")] {
            assert!(!users::delete(Some(&caller)));
            assert!(!doctors::delete(Some(&caller)));
            assert!(!organisations::delete(Some(&caller)));
            assert!(!media::delete(Some(&caller)));
        }
        assert!(users::delete(Some(&admin())));
        assert!(doctors::delete(Some(&admin())));
    }

    #[test]
    fn admin_panel_is_users_admin_only() {
        assert!(users::admin_panel(Some(&admin())));
        assert!(!users::admin_panel(Some(&user("2"))));
        assert!(!doctors::admin_panel(Some(&admin())));
        assert!(!organisations::admin_panel(Some(&admin())));
    }

    #[test]
    fn media_writes_for_admin_and_organisations() {
        assert!(media::create(Some(&admin())));
        assert!(media::create(Some(&organisation("7"))));
        assert!(!media::create(Some(&doctor("9"))));
        assert!(!media::create(None));
        assert!(media::update(Some(&organisation("7"))));
    }
}
