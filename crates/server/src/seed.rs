//! First-run seeding.
//!
//! A fresh deployment has no way to mint the first admin through the API
//! (user creation is admin-or-organisation gated), so an initial admin
//! account and the specialisation catalogue are created at startup when
//! their collections are empty.

use std::sync::Arc;

use serde_json::json;

use medway_core::Collection;
use medway_store::DocumentStore;

use crate::api::{creation_timestamps, hash_credentials};
use crate::config::SeedConfig;
use crate::error::ServerError;

/// Name/slug/icon triples for the specialisation catalogue.
const CATEGORY_FIXTURES: [(&str, &str, &str); 6] = [
    ("Therapist", "therapist", "stethoscope"),
    ("Cardiologist", "cardiologist", "heart"),
    ("Neurologist", "neurologist", "brain"),
    ("Dermatologist", "dermatologist", "scan"),
    ("Pediatrician", "pediatrician", "baby"),
    ("Psychologist", "psychologist", "brain"),
];

/// Seed the initial admin user and category fixtures if missing.
///
/// Idempotent: a non-empty collection is left untouched, so restarting a
/// populated deployment changes nothing.
pub async fn run(store: &Arc<dyn DocumentStore>, config: &SeedConfig) -> Result<(), ServerError> {
    if !config.enabled {
        return Ok(());
    }

    if store.count(Collection::Users).await? == 0 {
        let mut admin = json!({
            "email": config.admin_email,
            "password": config.admin_password,
            "role": "admin",
            "name": "Administrator",
        });
        hash_credentials(&mut admin)?;
        creation_timestamps(&mut admin);
        store.create(Collection::Users, admin).await?;
        tracing::info!(email = %config.admin_email, "seeded initial admin user");
    }

    if store.count(Collection::DoctorCategories).await? == 0 {
        for (name, slug, icon) in CATEGORY_FIXTURES {
            let mut category = json!({
                "name": name,
                "slug": slug,
                "icon": icon,
            });
            creation_timestamps(&mut category);
            store.create(Collection::DoctorCategories, category).await?;
        }
        tracing::info!(
            count = CATEGORY_FIXTURES.len(),
            "seeded doctor category fixtures"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use medway_store_memory::MemoryDocumentStore;

    fn store() -> Arc<dyn DocumentStore> {
        Arc::new(MemoryDocumentStore::new())
    }

    fn config() -> SeedConfig {
        SeedConfig {
            enabled: true,
            admin_email: "admin@medway.local".to_owned(),
            admin_password: "changeme".to_owned(),
        }
    }

    #[tokio::test]
    async fn seeds_admin_and_categories_once() {
        let store = store();
        run(&store, &config()).await.unwrap();
        assert_eq!(store.count(Collection::Users).await.unwrap(), 1);
        assert_eq!(store.count(Collection::DoctorCategories).await.unwrap(), 6);

        let admin = store
            .find_by_email(Collection::Users, "admin@medway.local")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin["role"], "admin");
        assert!(admin.get("password").is_none());
        assert!(admin.get("password_hash").is_some());

        // A second run must not duplicate anything.
        run(&store, &config()).await.unwrap();
        assert_eq!(store.count(Collection::Users).await.unwrap(), 1);
        assert_eq!(store.count(Collection::DoctorCategories).await.unwrap(), 6);
    }

    #[tokio::test]
    async fn disabled_seeding_is_a_noop() {
        let store = store();
        let config = SeedConfig {
            enabled: false,
            ..config()
        };
        run(&store, &config).await.unwrap();
        assert_eq!(store.count(Collection::Users).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn existing_users_suppress_admin_seed() {
        let store = store();
        let mut user = serde_json::json!({
            "email": "existing@example.com",
            "password_hash": "$argon2id$stub",
        });
        creation_timestamps(&mut user);
        store.create(Collection::Users, user).await.unwrap();

        run(&store, &config()).await.unwrap();
        assert_eq!(store.count(Collection::Users).await.unwrap(), 1);
        assert!(
            store
                .find_by_email(Collection::Users, "admin@medway.local")
                .await
                .unwrap()
                .is_none()
        );
    }
}
