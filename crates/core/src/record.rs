//! Stored document shapes for each collection.
//!
//! These are the full stored forms, including credential hashes for the
//! three auth collections. The HTTP layer strips `password_hash` before a
//! record ever leaves the server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::role::Role;
use crate::types::DocumentId;

/// A `users`-collection record: plain users and admins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    pub id: DocumentId,
    pub email: String,
    pub password_hash: String,
    /// Exactly one role value at any time; the sole authorization axis
    /// for this principal type.
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A `doctors`-collection record.
///
/// Every doctor belongs to exactly one organisation, assigned at creation;
/// doctors cannot reassign themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Doctor {
    pub id: DocumentId,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Owning organisation, required.
    pub organisation: DocumentId,
    /// Specialisation category references.
    #[serde(default)]
    pub categories: Vec<DocumentId>,
    /// Years of experience.
    #[serde(default)]
    pub experience: Option<u32>,
    /// Degree or qualification grade.
    #[serde(default)]
    pub degree: Option<String>,
    /// Consultation price.
    #[serde(default)]
    pub price: Option<u64>,
    /// Photo media reference.
    #[serde(default)]
    pub photo: Option<DocumentId>,
    #[serde(default)]
    pub bio: Option<String>,
    /// Ordered education entries.
    #[serde(default)]
    pub education: Vec<String>,
    /// Ordered offered services.
    #[serde(default)]
    pub services: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An `organisations`-collection record. Owns zero or more doctors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Organisation {
    pub id: DocumentId,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A doctor specialisation category. Independent of principal types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Category {
    pub id: DocumentId,
    pub name: String,
    /// URL slug, unique within the collection.
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Icon reference (icon-set name).
    #[serde(default)]
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A media asset record. Binary storage mechanics live outside this
/// subsystem; only the metadata is kept here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Media {
    pub id: DocumentId,
    pub alt: String,
    #[serde(default)]
    pub filename: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doctor_optional_fields_default() {
        let json = serde_json::json!({
            "id": "d1",
            "email": "doc@clinic.example",
            "password_hash": "$argon2id$stub",
            "organisation": "org1",
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-01T00:00:00Z",
        });
        let doctor: Doctor = serde_json::from_value(json).unwrap();
        assert!(doctor.categories.is_empty());
        assert!(doctor.education.is_empty());
        assert_eq!(doctor.price, None);
    }

    #[test]
    fn user_role_defaults_to_user() {
        let json = serde_json::json!({
            "id": "u1",
            "email": "u@example.com",
            "password_hash": "$argon2id$stub",
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-01T00:00:00Z",
        });
        let user: User = serde_json::from_value(json).unwrap();
        assert_eq!(user.role, Role::User);
    }
}
