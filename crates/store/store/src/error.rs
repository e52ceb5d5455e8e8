use thiserror::Error;

/// Errors surfaced by a [`crate::DocumentStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated (duplicate email or slug).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The stored document could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend itself failed (connection lost, engine error).
    #[error("backend error: {0}")]
    Backend(String),
}
