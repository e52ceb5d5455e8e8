//! Users collection endpoints.
//!
//! Reads are public. Creation is open to admins and organisations, with
//! the restriction that an organisation may only mint doctor-role staff
//! accounts. Updates are admin-or-self, deletes admin-only.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::{Value, json};
use utoipa::ToSchema;

use medway_core::{Collection, Role};

use crate::error::ServerError;
use crate::policy;

use super::schemas::sanitize;
use super::{AppState, creation_timestamps, hash_credentials, scrub_patch};

/// Request body for creating a user account.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "staff@clinic.example")]
    pub email: String,
    pub password: String,
    /// Role for the new account. Defaults to `user`.
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub name: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    summary = "List user accounts",
    responses((status = 200, description = "User list", body = [Object]))
)]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServerError> {
    let docs = state.store.list(Collection::Users).await?;
    let docs: Vec<Value> = docs.into_iter().map(sanitize).collect();
    Ok(Json(docs))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    summary = "Get a user account",
    responses(
        (status = 200, description = "User record", body = Object),
        (status = 404, description = "Not found", body = super::schemas::ErrorResponse),
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let doc = state
        .store
        .find_by_id(Collection::Users, &id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("user {id}")))?;
    Ok(Json(sanitize(doc)))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    summary = "Create a user account",
    request_body(content = CreateUserRequest, description = "New account"),
    responses(
        (status = 201, description = "Account created", body = Object),
        (status = 403, description = "Not permitted", body = super::schemas::ErrorResponse),
        (status = 409, description = "Email already registered", body = super::schemas::ErrorResponse),
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    axum::Extension(identity): axum::Extension<crate::auth::RequestIdentity>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let caller = identity.caller();
    let requested = req.role.unwrap_or_default();
    if !policy::users::create_with_role(caller, requested) {
        return Err(ServerError::permission_denied());
    }

    let mut doc = json!({
        "email": req.email,
        "password": req.password,
        "role": requested,
        "name": req.name,
    });
    hash_credentials(&mut doc)?;
    creation_timestamps(&mut doc);

    let stored = state.store.create(Collection::Users, doc).await?;
    Ok((StatusCode::CREATED, Json(sanitize(stored))))
}

#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    tag = "Users",
    summary = "Update a user account",
    request_body(content = Object, description = "Fields to merge"),
    responses(
        (status = 200, description = "Updated record", body = Object),
        (status = 403, description = "Not permitted", body = super::schemas::ErrorResponse),
        (status = 404, description = "Not found", body = super::schemas::ErrorResponse),
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    axum::Extension(identity): axum::Extension<crate::auth::RequestIdentity>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Result<impl IntoResponse, ServerError> {
    if !policy::users::update(identity.caller(), &id) {
        return Err(ServerError::permission_denied());
    }
    let patch = scrub_patch(patch)?;
    let updated = state
        .store
        .update(Collection::Users, &id, patch)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("user {id}")))?;
    Ok(Json(sanitize(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    summary = "Delete a user account",
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Not permitted", body = super::schemas::ErrorResponse),
        (status = 404, description = "Not found", body = super::schemas::ErrorResponse),
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    axum::Extension(identity): axum::Extension<crate::auth::RequestIdentity>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    if !policy::users::delete(identity.caller()) {
        return Err(ServerError::permission_denied());
    }
    if !state.store.delete(Collection::Users, &id).await? {
        return Err(ServerError::NotFound(format!("user {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}
