//! Organisations collection endpoints.
//!
//! Only admins enrol new organisations; an organisation may edit its own
//! record afterwards.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::{Value, json};
use utoipa::ToSchema;

use medway_core::Collection;

use crate::error::ServerError;
use crate::policy;

use super::schemas::sanitize;
use super::{AppState, creation_timestamps, hash_credentials, scrub_patch};

/// Request body for enrolling an organisation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrganisationRequest {
    #[schema(example = "contact@clinic.example")]
    pub email: String,
    pub password: String,
    #[schema(example = "Riverside Clinic")]
    pub name: String,
}

#[utoipa::path(
    get,
    path = "/api/organisations",
    tag = "Organisations",
    summary = "List organisations",
    responses((status = 200, description = "Organisation list", body = [Object]))
)]
pub async fn list_organisations(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServerError> {
    let docs = state.store.list(Collection::Organisations).await?;
    let docs: Vec<Value> = docs.into_iter().map(sanitize).collect();
    Ok(Json(docs))
}

#[utoipa::path(
    get,
    path = "/api/organisations/{id}",
    tag = "Organisations",
    summary = "Get an organisation",
    responses(
        (status = 200, description = "Organisation record", body = Object),
        (status = 404, description = "Not found", body = super::schemas::ErrorResponse),
    )
)]
pub async fn get_organisation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let doc = state
        .store
        .find_by_id(Collection::Organisations, &id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("organisation {id}")))?;
    Ok(Json(sanitize(doc)))
}

#[utoipa::path(
    post,
    path = "/api/organisations",
    tag = "Organisations",
    summary = "Enrol an organisation",
    request_body(content = CreateOrganisationRequest, description = "New organisation"),
    responses(
        (status = 201, description = "Organisation created", body = Object),
        (status = 403, description = "Not permitted", body = super::schemas::ErrorResponse),
        (status = 409, description = "Email already registered", body = super::schemas::ErrorResponse),
    )
)]
pub async fn create_organisation(
    State(state): State<AppState>,
    axum::Extension(identity): axum::Extension<crate::auth::RequestIdentity>,
    Json(req): Json<CreateOrganisationRequest>,
) -> Result<impl IntoResponse, ServerError> {
    if !policy::organisations::create(identity.caller()) {
        return Err(ServerError::permission_denied());
    }

    let mut doc = json!({
        "email": req.email,
        "password": req.password,
        "name": req.name,
    });
    hash_credentials(&mut doc)?;
    creation_timestamps(&mut doc);

    let stored = state.store.create(Collection::Organisations, doc).await?;
    Ok((StatusCode::CREATED, Json(sanitize(stored))))
}

#[utoipa::path(
    patch,
    path = "/api/organisations/{id}",
    tag = "Organisations",
    summary = "Update an organisation",
    request_body(content = Object, description = "Fields to merge"),
    responses(
        (status = 200, description = "Updated record", body = Object),
        (status = 403, description = "Not permitted", body = super::schemas::ErrorResponse),
        (status = 404, description = "Not found", body = super::schemas::ErrorResponse),
    )
)]
pub async fn update_organisation(
    State(state): State<AppState>,
    axum::Extension(identity): axum::Extension<crate::auth::RequestIdentity>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Result<impl IntoResponse, ServerError> {
    if !policy::organisations::update(identity.caller(), &id) {
        return Err(ServerError::permission_denied());
    }
    let patch = scrub_patch(patch)?;
    let updated = state
        .store
        .update(Collection::Organisations, &id, patch)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("organisation {id}")))?;
    Ok(Json(sanitize(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/organisations/{id}",
    tag = "Organisations",
    summary = "Delete an organisation",
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Not permitted", body = super::schemas::ErrorResponse),
        (status = 404, description = "Not found", body = super::schemas::ErrorResponse),
    )
)]
pub async fn delete_organisation(
    State(state): State<AppState>,
    axum::Extension(identity): axum::Extension<crate::auth::RequestIdentity>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    if !policy::organisations::delete(identity.caller()) {
        return Err(ServerError::permission_denied());
    }
    if !state.store.delete(Collection::Organisations, &id).await? {
        return Err(ServerError::NotFound(format!("organisation {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}
