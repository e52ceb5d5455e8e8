//! Test support shared by store backends and the server test suite.

use async_trait::async_trait;
use serde_json::Value;

use medway_core::Collection;

use crate::error::StoreError;
use crate::store::DocumentStore;

/// A store whose every operation fails with a backend error.
///
/// Used to exercise graceful-degradation paths: identity rehydration must
/// absorb lookup failures and leave the request anonymous.
#[derive(Debug, Default)]
pub struct FailingStore;

impl FailingStore {
    fn err<T>() -> Result<T, StoreError> {
        Err(StoreError::Backend("store unavailable".to_owned()))
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn create(&self, _collection: Collection, _doc: Value) -> Result<Value, StoreError> {
        Self::err()
    }

    async fn find_by_id(
        &self,
        _collection: Collection,
        _id: &str,
    ) -> Result<Option<Value>, StoreError> {
        Self::err()
    }

    async fn find_by_email(
        &self,
        _collection: Collection,
        _email: &str,
    ) -> Result<Option<Value>, StoreError> {
        Self::err()
    }

    async fn list(&self, _collection: Collection) -> Result<Vec<Value>, StoreError> {
        Self::err()
    }

    async fn update(
        &self,
        _collection: Collection,
        _id: &str,
        _changes: Value,
    ) -> Result<Option<Value>, StoreError> {
        Self::err()
    }

    async fn delete(&self, _collection: Collection, _id: &str) -> Result<bool, StoreError> {
        Self::err()
    }

    async fn count(&self, _collection: Collection) -> Result<usize, StoreError> {
        Self::err()
    }
}

/// Run the document store conformance test suite.
///
/// Call this from a backend's test module with a fresh store instance.
///
/// # Errors
///
/// Returns an error if any conformance test fails.
pub async fn run_store_conformance_tests(store: &dyn DocumentStore) -> Result<(), StoreError> {
    test_find_missing(store).await?;
    test_create_assigns_id(store).await?;
    test_find_by_email(store).await?;
    test_duplicate_email_conflicts(store).await?;
    test_update_merges(store).await?;
    test_update_preserves_uniqueness(store).await?;
    test_delete(store).await?;
    test_list_and_count(store).await?;
    Ok(())
}

async fn test_find_missing(store: &dyn DocumentStore) -> Result<(), StoreError> {
    let found = store.find_by_id(Collection::Users, "missing").await?;
    assert!(found.is_none(), "find on missing id should return None");
    Ok(())
}

async fn test_create_assigns_id(store: &dyn DocumentStore) -> Result<(), StoreError> {
    let doc = store
        .create(
            Collection::Media,
            serde_json::json!({"alt": "portrait", "id": "ignored"}),
        )
        .await?;
    let id = doc["id"].as_str().expect("created doc should carry an id");
    assert_ne!(id, "ignored", "caller-supplied id must be replaced");
    let found = store.find_by_id(Collection::Media, id).await?;
    assert_eq!(found.as_ref().map(|d| &d["alt"]), Some(&doc["alt"]));
    Ok(())
}

async fn test_find_by_email(store: &dyn DocumentStore) -> Result<(), StoreError> {
    store
        .create(
            Collection::Organisations,
            serde_json::json!({"email": "clinic@example.com", "name": "Clinic"}),
        )
        .await?;
    let found = store
        .find_by_email(Collection::Organisations, "clinic@example.com")
        .await?;
    assert!(found.is_some(), "email lookup should find the document");
    let missing = store
        .find_by_email(Collection::Organisations, "other@example.com")
        .await?;
    assert!(missing.is_none());
    Ok(())
}

async fn test_duplicate_email_conflicts(store: &dyn DocumentStore) -> Result<(), StoreError> {
    store
        .create(
            Collection::Users,
            serde_json::json!({"email": "dup@example.com"}),
        )
        .await?;
    let second = store
        .create(
            Collection::Users,
            serde_json::json!({"email": "dup@example.com"}),
        )
        .await;
    assert!(
        matches!(second, Err(StoreError::Conflict(_))),
        "duplicate email should conflict"
    );
    Ok(())
}

async fn test_update_merges(store: &dyn DocumentStore) -> Result<(), StoreError> {
    let doc = store
        .create(
            Collection::DoctorCategories,
            serde_json::json!({"name": "Therapist", "slug": "therapist"}),
        )
        .await?;
    let id = doc["id"].as_str().unwrap();

    let updated = store
        .update(
            Collection::DoctorCategories,
            id,
            serde_json::json!({"description": "General practice", "id": "spoofed"}),
        )
        .await?
        .expect("update of existing doc should return it");
    assert_eq!(updated["name"], "Therapist", "untouched fields survive");
    assert_eq!(updated["description"], "General practice");
    assert_eq!(updated["id"], id, "id is immutable");

    let gone = store
        .update(
            Collection::DoctorCategories,
            "missing",
            serde_json::json!({}),
        )
        .await?;
    assert!(gone.is_none(), "update of missing doc should return None");
    Ok(())
}

async fn test_update_preserves_uniqueness(store: &dyn DocumentStore) -> Result<(), StoreError> {
    store
        .create(
            Collection::DoctorCategories,
            serde_json::json!({"name": "Cardiologist", "slug": "cardiologist"}),
        )
        .await?;
    let second = store
        .create(
            Collection::DoctorCategories,
            serde_json::json!({"name": "Neurologist", "slug": "neurologist"}),
        )
        .await?;
    let second_id = second["id"].as_str().unwrap();

    // Merging a taken slug onto another document must conflict, not stick.
    let stolen = store
        .update(
            Collection::DoctorCategories,
            second_id,
            serde_json::json!({"slug": "cardiologist"}),
        )
        .await;
    assert!(
        matches!(stolen, Err(StoreError::Conflict(_))),
        "update to a taken slug should conflict"
    );
    let unchanged = store
        .find_by_id(Collection::DoctorCategories, second_id)
        .await?
        .expect("document should still exist");
    assert_eq!(unchanged["slug"], "neurologist");

    // A document may re-assert its own unique value.
    let own = store
        .update(
            Collection::DoctorCategories,
            second_id,
            serde_json::json!({"slug": "neurologist", "name": "Neurology"}),
        )
        .await?
        .expect("self-update should succeed");
    assert_eq!(own["name"], "Neurology");

    // Same invariant for auth-collection emails.
    let user = store
        .create(
            Collection::Users,
            serde_json::json!({"email": "first@example.com"}),
        )
        .await?;
    store
        .create(
            Collection::Users,
            serde_json::json!({"email": "second@example.com"}),
        )
        .await?;
    let user_id = user["id"].as_str().unwrap();
    let taken = store
        .update(
            Collection::Users,
            user_id,
            serde_json::json!({"email": "second@example.com"}),
        )
        .await;
    assert!(
        matches!(taken, Err(StoreError::Conflict(_))),
        "update to a taken email should conflict"
    );
    Ok(())
}

async fn test_delete(store: &dyn DocumentStore) -> Result<(), StoreError> {
    let doc = store
        .create(Collection::Media, serde_json::json!({"alt": "x-ray"}))
        .await?;
    let id = doc["id"].as_str().unwrap();
    assert!(store.delete(Collection::Media, id).await?);
    assert!(store.find_by_id(Collection::Media, id).await?.is_none());
    assert!(
        !store.delete(Collection::Media, id).await?,
        "second delete should report missing"
    );
    Ok(())
}

async fn test_list_and_count(store: &dyn DocumentStore) -> Result<(), StoreError> {
    let before = store.count(Collection::Doctors).await?;
    store
        .create(
            Collection::Doctors,
            serde_json::json!({"email": "d1@example.com", "organisation": "org-1"}),
        )
        .await?;
    store
        .create(
            Collection::Doctors,
            serde_json::json!({"email": "d2@example.com", "organisation": "org-1"}),
        )
        .await?;
    assert_eq!(store.count(Collection::Doctors).await?, before + 2);
    let listed = store.list(Collection::Doctors).await?;
    assert_eq!(listed.len(), before + 2);
    Ok(())
}
