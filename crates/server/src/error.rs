use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use medway_store::StoreError;

/// Errors that can occur when running the Medway server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O error (e.g. binding the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A document store failure surfaced through the API.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The request body was malformed or failed validation.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Authentication failed (missing or invalid credentials).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Caller lacks permission for the requested operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The target document does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An internal failure (token signing, password hashing).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// The generic credential-mismatch error. Deliberately identical for
    /// unknown email and wrong password.
    pub fn invalid_credentials() -> Self {
        Self::Unauthorized("invalid email or password".to_owned())
    }

    /// The generic policy-denial error.
    pub fn permission_denied() -> Self {
        Self::Forbidden("you are not allowed to perform this action".to_owned())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Store(StoreError::Conflict(msg)) => (StatusCode::CONFLICT, msg.clone()),
            Self::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            Self::Config(msg) | Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Self::Io(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_maps_to_409() {
        let err = ServerError::Store(StoreError::Conflict("duplicate email".to_owned()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn credential_error_is_generic() {
        let err = ServerError::invalid_credentials();
        assert_eq!(err.to_string(), "unauthorized: invalid email or password");
    }
}
