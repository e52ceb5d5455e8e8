use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a stored document.
///
/// IDs are opaque strings assigned by the document store (UUIDv7 in the
/// in-memory backend). Comparisons are exact string comparisons, so an id
/// decoded out of a session token and an id loaded from the store can be
/// checked for self-access without caring about the backend's native id type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", schema(value_type = String))]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Create a new instance from a string value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Return the inner string as a str slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl std::ops::Deref for DocumentId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_from_str() {
        let id = DocumentId::from("doc-1");
        assert_eq!(id.as_str(), "doc-1");
        assert_eq!(&*id, "doc-1");
    }

    #[test]
    fn id_serde_roundtrip() {
        let id = DocumentId::new("7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"7\"");
        let back: DocumentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
