use std::sync::Mutex;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

use medway_core::Collection;
use medway_store::error::StoreError;
use medway_store::key::DocumentKey;
use medway_store::store::DocumentStore;

/// In-memory [`DocumentStore`] backed by a [`DashMap`].
///
/// Documents are keyed by their canonical `collection:id` key. Ids are
/// UUIDv7, so id order is insertion order and `list` can sort by id.
/// This implementation is fully synchronous internally; the async trait
/// methods return immediately.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    data: DashMap<String, Value>,
    /// Serializes creates and updates so the uniqueness scan and the write
    /// are atomic.
    write_guard: Mutex<()>,
}

impl MemoryDocumentStore {
    /// Create a new, empty in-memory document store.
    pub fn new() -> Self {
        Self::default()
    }

    fn prefix(collection: Collection) -> String {
        format!("{collection}:")
    }

    /// Fields that must be unique within a collection, besides `id`.
    fn unique_fields(collection: Collection) -> &'static [&'static str] {
        match collection {
            Collection::Users | Collection::Doctors | Collection::Organisations => &["email"],
            Collection::DoctorCategories => &["slug"],
            Collection::Media => &[],
        }
    }

    fn find_by_field(&self, collection: Collection, field: &str, value: &str) -> Option<Value> {
        let prefix = Self::prefix(collection);
        self.data
            .iter()
            .filter(|entry| entry.key().starts_with(&prefix))
            .find(|entry| entry.value()[field].as_str() == Some(value))
            .map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create(&self, collection: Collection, mut doc: Value) -> Result<Value, StoreError> {
        let Some(fields) = doc.as_object_mut() else {
            return Err(StoreError::Backend(
                "document must be a JSON object".to_owned(),
            ));
        };

        let id = Uuid::now_v7().to_string();
        fields.insert("id".to_owned(), Value::String(id.clone()));

        let guard = self
            .write_guard
            .lock()
            .map_err(|_| StoreError::Backend("write guard poisoned".to_owned()))?;

        for field in Self::unique_fields(collection) {
            if let Some(value) = doc[*field].as_str()
                && self.find_by_field(collection, field, value).is_some()
            {
                return Err(StoreError::Conflict(format!(
                    "{collection} document with {field} {value:?} already exists"
                )));
            }
        }

        let key = DocumentKey::new(collection, id).canonical();
        self.data.insert(key, doc.clone());
        drop(guard);

        Ok(doc)
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Value>, StoreError> {
        let key = DocumentKey::new(collection, id).canonical();
        Ok(self.data.get(&key).map(|entry| entry.value().clone()))
    }

    async fn find_by_email(
        &self,
        collection: Collection,
        email: &str,
    ) -> Result<Option<Value>, StoreError> {
        Ok(self.find_by_field(collection, "email", email))
    }

    async fn list(&self, collection: Collection) -> Result<Vec<Value>, StoreError> {
        let prefix = Self::prefix(collection);
        let mut docs: Vec<(String, Value)> = self
            .data
            .iter()
            .filter(|entry| entry.key().starts_with(&prefix))
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        // UUIDv7 keys sort chronologically, so key order is insertion order.
        docs.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(docs.into_iter().map(|(_, doc)| doc).collect())
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        changes: Value,
    ) -> Result<Option<Value>, StoreError> {
        let key = DocumentKey::new(collection, id).canonical();

        let guard = self
            .write_guard
            .lock()
            .map_err(|_| StoreError::Backend("write guard poisoned".to_owned()))?;

        if !self.data.contains_key(&key) {
            return Ok(None);
        }

        // Unique fields stay unique through merges too. Scanned before the
        // entry is locked so find_by_field can iterate freely; the target
        // itself is exempt so a no-op patch of its own value passes.
        if let Some(fields) = changes.as_object() {
            for field in Self::unique_fields(collection) {
                if let Some(value) = fields.get(*field).and_then(Value::as_str)
                    && let Some(existing) = self.find_by_field(collection, field, value)
                    && existing["id"].as_str() != Some(id)
                {
                    return Err(StoreError::Conflict(format!(
                        "{collection} document with {field} {value:?} already exists"
                    )));
                }
            }
        }

        let Some(mut entry) = self.data.get_mut(&key) else {
            return Ok(None);
        };

        if let (Some(doc), Some(changes)) = (entry.value_mut().as_object_mut(), changes.as_object())
        {
            for (field, value) in changes {
                // The id field is immutable.
                if field == "id" {
                    continue;
                }
                doc.insert(field.clone(), value.clone());
            }
        }

        let updated = entry.value().clone();
        drop(entry);
        drop(guard);

        Ok(Some(updated))
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<bool, StoreError> {
        let key = DocumentKey::new(collection, id).canonical();
        Ok(self.data.remove(&key).is_some())
    }

    async fn count(&self, collection: Collection) -> Result<usize, StoreError> {
        let prefix = Self::prefix(collection);
        Ok(self
            .data
            .iter()
            .filter(|entry| entry.key().starts_with(&prefix))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medway_store::testing::run_store_conformance_tests;

    #[tokio::test]
    async fn conformance() {
        let store = MemoryDocumentStore::new();
        run_store_conformance_tests(&store)
            .await
            .expect("memory store should pass conformance suite");
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = MemoryDocumentStore::new();
        for n in 0..5 {
            store
                .create(
                    Collection::Media,
                    serde_json::json!({"alt": format!("asset-{n}")}),
                )
                .await
                .unwrap();
        }
        let listed = store.list(Collection::Media).await.unwrap();
        let alts: Vec<&str> = listed.iter().filter_map(|d| d["alt"].as_str()).collect();
        assert_eq!(alts, ["asset-0", "asset-1", "asset-2", "asset-3", "asset-4"]);
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let store = MemoryDocumentStore::new();
        let doc = store
            .create(Collection::Users, serde_json::json!({"email": "a@b.c"}))
            .await
            .unwrap();
        let id = doc["id"].as_str().unwrap();
        assert!(
            store
                .find_by_id(Collection::Doctors, id)
                .await
                .unwrap()
                .is_none()
        );
    }
}
