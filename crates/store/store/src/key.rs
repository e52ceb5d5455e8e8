use serde::{Deserialize, Serialize};

use medway_core::{Collection, DocumentId};

/// Key addressing one document in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentKey {
    pub collection: Collection,
    pub id: DocumentId,
}

impl DocumentKey {
    /// Create a new document key.
    #[must_use]
    pub fn new(collection: Collection, id: impl Into<DocumentId>) -> Self {
        Self {
            collection,
            id: id.into(),
        }
    }

    /// Return a canonical string representation: `collection:id`
    #[must_use]
    pub fn canonical(&self) -> String {
        format!("{}:{}", self.collection, self.id)
    }
}

impl std::fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_joins_collection_and_id() {
        let key = DocumentKey::new(Collection::Doctors, "9");
        assert_eq!(key.canonical(), "doctors:9");
        assert_eq!(key.to_string(), "doctors:9");
    }
}
