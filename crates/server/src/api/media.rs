//! Media collection endpoints.
//!
//! Metadata only; the asset bytes live behind whatever storage fronts the
//! deployment. Admins and organisations upload, only admins delete.

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

use super::{AppState, creation_timestamps, scrub_patch};

/// Request body for registering a media asset.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMediaRequest {
    /// Alt text, required for every asset.
    #[schema(example = "Dr. Adams portrait")]
    pub alt: String,
    #[serde(default)]
    #[schema(example = "adams.jpg")]
    pub filename: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/media",
    tag = "Media",
    summary = "List media assets",
    responses((status = 200, description = "Media list", body = [Object]))
)]
pub async fn list_media(State(state): State<AppState>) -> Result<impl IntoResponse, ServerError> {
    let docs = state.store.list(Collection::Media).await?;
    Ok(Json(docs))
}

#[utoipa::path(
    get,
    path = "/api/media/{id}",
    tag = "Media",
    summary = "Get a media asset",
    responses(
        (status = 200, description = "Media record", body = Object),
        (status = 404, description = "Not found", body = super::schemas::ErrorResponse),
    )
)]
pub async fn get_media(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let doc = state
        .store
        .find_by_id(Collection::Media, &id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("media {id}")))?;
    Ok(Json(doc))
}

#[utoipa::path(
    post,
    path = "/api/media",
    tag = "Media",
    summary = "Register a media asset",
    request_body(content = CreateMediaRequest, description = "Asset metadata"),
    responses(
        (status = 201, description = "Media created", body = Object),
        (status = 403, description = "Not permitted", body = super::schemas::ErrorResponse),
    )
)]
pub async fn create_media(
    State(state): State<AppState>,
    axum::Extension(identity): axum::Extension<crate::auth::RequestIdentity>,
    Json(req): Json<CreateMediaRequest>,
) -> Result<impl IntoResponse, ServerError> {
    if !policy::media::create(identity.caller()) {
        return Err(ServerError::permission_denied());
    }

    let mut doc = json!({
        "alt": req.alt,
        "filename": req.filename,
    });
    creation_timestamps(&mut doc);

    let stored = state.store.create(Collection::Media, doc).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

#[utoipa::path(
    patch,
    path = "/api/media/{id}",
    tag = "Media",
    summary = "Update a media asset",
    request_body(content = Object, description = "Fields to merge"),
    responses(
        (status = 200, description = "Updated record", body = Object),
        (status = 403, description = "Not permitted", body = super::schemas::ErrorResponse),
        (status = 404, description = "Not found", body = super::schemas::ErrorResponse),
    )
)]
pub async fn update_media(
    State(state): State<AppState>,
    axum::Extension(identity): axum::Extension<crate::auth::RequestIdentity>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Result<impl IntoResponse, ServerError> {
    if !policy::media::update(identity.caller()) {
        return Err(ServerError::permission_denied());
    }
    let patch = scrub_patch(patch)?;
    let updated = state
        .store
        .update(Collection::Media, &id, patch)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("media {id}")))?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/media/{id}",
    tag = "Media",
    summary = "Delete a media asset",
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Not permitted", body = super::schemas::ErrorResponse),
        (status = 404, description = "Not found", body = super::schemas::ErrorResponse),
    )
)]
pub async fn delete_media(
    State(state): State<AppState>,
    axum::Extension(identity): axum::Extension<crate::auth::RequestIdentity>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    if !policy::media::delete(identity.caller()) {
        return Err(ServerError::permission_denied());
    }
    if !state.store.delete(Collection::Media, &id).await? {
        return Err(ServerError::NotFound(format!("media {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}
