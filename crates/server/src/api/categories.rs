//! Doctor-category collection endpoints.
//!
//! Categories are catalogue data: anyone can browse them, only admin
//! users curate them. Slugs are unique within the collection.

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

/// Request body for creating a doctor category.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    #[schema(example = "Cardiologist")]
    pub name: String,
    /// URL slug, unique within the collection.
    #[schema(example = "cardiologist")]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Icon reference (icon-set name).
    #[serde(default)]
    #[schema(example = "heart")]
    pub icon: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/doctor-categories",
    tag = "Doctor Categories",
    summary = "List doctor categories",
    responses((status = 200, description = "Category list", body = [Object]))
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServerError> {
    let docs = state.store.list(Collection::DoctorCategories).await?;
    Ok(Json(docs))
}

#[utoipa::path(
    get,
    path = "/api/doctor-categories/{id}",
    tag = "Doctor Categories",
    summary = "Get a doctor category",
    responses(
        (status = 200, description = "Category record", body = Object),
        (status = 404, description = "Not found", body = super::schemas::ErrorResponse),
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let doc = state
        .store
        .find_by_id(Collection::DoctorCategories, &id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("doctor category {id}")))?;
    Ok(Json(doc))
}

#[utoipa::path(
    post,
    path = "/api/doctor-categories",
    tag = "Doctor Categories",
    summary = "Create a doctor category",
    request_body(content = CreateCategoryRequest, description = "New category"),
    responses(
        (status = 201, description = "Category created", body = Object),
        (status = 403, description = "Not permitted", body = super::schemas::ErrorResponse),
        (status = 409, description = "Slug already taken", body = super::schemas::ErrorResponse),
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    axum::Extension(identity): axum::Extension<crate::auth::RequestIdentity>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse, ServerError> {
    if !policy::categories::create(identity.caller()) {
        return Err(ServerError::permission_denied());
    }

    let mut doc = json!({
        "name": req.name,
        "slug": req.slug,
        "description": req.description,
        "icon": req.icon,
    });
    creation_timestamps(&mut doc);

    let stored = state.store.create(Collection::DoctorCategories, doc).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

#[utoipa::path(
    patch,
    path = "/api/doctor-categories/{id}",
    tag = "Doctor Categories",
    summary = "Update a doctor category",
    request_body(content = Object, description = "Fields to merge"),
    responses(
        (status = 200, description = "Updated record", body = Object),
        (status = 403, description = "Not permitted", body = super::schemas::ErrorResponse),
        (status = 404, description = "Not found", body = super::schemas::ErrorResponse),
    )
)]
pub async fn update_category(
    State(state): State<AppState>,
    axum::Extension(identity): axum::Extension<crate::auth::RequestIdentity>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Result<impl IntoResponse, ServerError> {
    if !policy::categories::update(identity.caller()) {
        return Err(ServerError::permission_denied());
    }
    let patch = scrub_patch(patch)?;
    let updated = state
        .store
        .update(Collection::DoctorCategories, &id, patch)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("doctor category {id}")))?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/doctor-categories/{id}",
    tag = "Doctor Categories",
    summary = "Delete a doctor category",
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Not permitted", body = super::schemas::ErrorResponse),
        (status = 404, description = "Not found", body = super::schemas::ErrorResponse),
    )
)]
pub async fn delete_category(
    State(state): State<AppState>,
    axum::Extension(identity): axum::Extension<crate::auth::RequestIdentity>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    if !policy::categories::delete(identity.caller()) {
        return Err(ServerError::permission_denied());
    }
    if !state.store.delete(Collection::DoctorCategories, &id).await? {
        return Err(ServerError::NotFound(format!("doctor category {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}
