use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Error response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    #[schema(example = "invalid email or password")]
    pub error: String,
}

/// Confirmation message payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "logged out")]
    pub message: String,
}

/// Login request payload, identical for all three auth collections.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "org@clinic.example")]
    pub email: String,
    pub password: String,
}

/// Successful login payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// The session token also delivered in the collection's cookie.
    pub token: String,
    /// The authenticated record, credentials stripped.
    #[schema(value_type = Object)]
    pub user: Value,
    /// Token expiry, seconds since epoch.
    pub exp: usize,
    #[schema(example = "login successful")]
    pub message: String,
}

/// Current-session payload. `user` is `null` for anonymous requests.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    #[schema(value_type = Object)]
    pub user: Option<Value>,
}

/// Remove credential material from a stored document before it leaves
/// the server.
pub fn sanitize(mut doc: Value) -> Value {
    if let Some(fields) = doc.as_object_mut() {
        fields.remove("password_hash");
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_password_hash() {
        let doc = serde_json::json!({"id": "1", "email": "a@b.c", "password_hash": "$argon2id$x"});
        let clean = sanitize(doc);
        assert!(clean.get("password_hash").is_none());
        assert_eq!(clean["email"], "a@b.c");
    }

    #[test]
    fn sanitize_passes_non_objects_through() {
        assert_eq!(sanitize(Value::Null), Value::Null);
    }
}
