use async_trait::async_trait;
use serde_json::Value;

use medway_core::Collection;

use crate::error::StoreError;

/// Trait for the opaque document engine behind the marketplace.
///
/// The auth subsystem only gates *whether* a mutation is attempted;
/// serialization of concurrent writes is the backend's concern.
/// Implementations must be `Send + Sync` and safe for concurrent access.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document and return the stored form with its assigned `id`.
    ///
    /// The backend assigns `id` (any `id` field in `doc` is ignored) and is
    /// responsible for uniqueness of `email` within auth collections and
    /// `slug` within `doctor-categories`, returning [`StoreError::Conflict`]
    /// on violation.
    async fn create(&self, collection: Collection, doc: Value) -> Result<Value, StoreError>;

    /// Fetch a document by id. Returns `None` if not found.
    async fn find_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Value>, StoreError>;

    /// Fetch a document by its `email` field. Returns `None` if not found.
    ///
    /// Only meaningful for the auth collections; content collections have
    /// no email field and always yield `None`.
    async fn find_by_email(
        &self,
        collection: Collection,
        email: &str,
    ) -> Result<Option<Value>, StoreError>;

    /// List all documents in a collection, in insertion order.
    async fn list(&self, collection: Collection) -> Result<Vec<Value>, StoreError>;

    /// Shallow-merge `changes` into an existing document.
    ///
    /// Returns the updated document, or `None` if no document with that id
    /// exists. The `id` field cannot be changed.
    async fn update(
        &self,
        collection: Collection,
        id: &str,
        changes: Value,
    ) -> Result<Option<Value>, StoreError>;

    /// Delete a document. Returns `true` if it existed.
    async fn delete(&self, collection: Collection, id: &str) -> Result<bool, StoreError>;

    /// Number of documents in a collection (used by seeding and health).
    async fn count(&self, collection: Collection) -> Result<usize, StoreError>;
}
