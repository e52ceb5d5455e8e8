//! Doctors collection endpoints.
//!
//! The marketplace storefront lists doctors publicly and filters by
//! category or owning organisation. Organisations create their own staff:
//! on create by an organisation caller the `organisation` reference is
//! force-set to the caller, whatever the request body says.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::{Value, json};
use utoipa::{IntoParams, ToSchema};

use medway_core::{Caller, Collection};

use crate::error::ServerError;
use crate::policy;

use super::schemas::sanitize;
use super::{AppState, creation_timestamps, hash_credentials, scrub_patch};

/// Request body for creating a doctor.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDoctorRequest {
    #[schema(example = "dr.adams@clinic.example")]
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Owning organisation. Ignored when the caller is an organisation;
    /// required otherwise.
    #[serde(default)]
    pub organisation: Option<String>,
    /// Specialisation category ids.
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub experience: Option<u32>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
}

/// Query filters for the doctor list.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListDoctorsParams {
    /// Only doctors tagged with this category id.
    #[serde(default)]
    pub category: Option<String>,
    /// Only doctors belonging to this organisation id.
    #[serde(default)]
    pub organisation: Option<String>,
}

fn matches_filters(doc: &Value, params: &ListDoctorsParams) -> bool {
    if let Some(org) = &params.organisation
        && doc.get("organisation").and_then(|v| v.as_str()) != Some(org.as_str())
    {
        return false;
    }
    if let Some(category) = &params.category {
        let tagged = doc
            .get("categories")
            .and_then(|v| v.as_array())
            .is_some_and(|cats| cats.iter().any(|c| c.as_str() == Some(category.as_str())));
        if !tagged {
            return false;
        }
    }
    true
}

#[utoipa::path(
    get,
    path = "/api/doctors",
    tag = "Doctors",
    summary = "List doctors",
    params(ListDoctorsParams),
    responses((status = 200, description = "Doctor list", body = [Object]))
)]
pub async fn list_doctors(
    State(state): State<AppState>,
    Query(params): Query<ListDoctorsParams>,
) -> Result<impl IntoResponse, ServerError> {
    let docs = state.store.list(Collection::Doctors).await?;
    let docs: Vec<Value> = docs
        .into_iter()
        .filter(|doc| matches_filters(doc, &params))
        .map(sanitize)
        .collect();
    Ok(Json(docs))
}

#[utoipa::path(
    get,
    path = "/api/doctors/{id}",
    tag = "Doctors",
    summary = "Get a doctor",
    responses(
        (status = 200, description = "Doctor record", body = Object),
        (status = 404, description = "Not found", body = super::schemas::ErrorResponse),
    )
)]
pub async fn get_doctor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let doc = state
        .store
        .find_by_id(Collection::Doctors, &id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("doctor {id}")))?;
    Ok(Json(sanitize(doc)))
}

#[utoipa::path(
    post,
    path = "/api/doctors",
    tag = "Doctors",
    summary = "Create a doctor",
    request_body(content = CreateDoctorRequest, description = "New doctor"),
    responses(
        (status = 201, description = "Doctor created", body = Object),
        (status = 400, description = "Missing organisation", body = super::schemas::ErrorResponse),
        (status = 403, description = "Not permitted", body = super::schemas::ErrorResponse),
        (status = 409, description = "Email already registered", body = super::schemas::ErrorResponse),
    )
)]
pub async fn create_doctor(
    State(state): State<AppState>,
    axum::Extension(identity): axum::Extension<crate::auth::RequestIdentity>,
    Json(req): Json<CreateDoctorRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let caller = identity.caller();
    if !policy::doctors::create(caller) {
        return Err(ServerError::permission_denied());
    }

    // An organisation always owns the doctors it creates.
    let organisation = match caller {
        Some(Caller::Organisation { id, .. }) => id.to_string(),
        _ => req.organisation.clone().ok_or_else(|| {
            ServerError::BadRequest("organisation is required".to_string())
        })?,
    };

    let mut doc = json!({
        "email": req.email,
        "password": req.password,
        "name": req.name,
        "organisation": organisation,
        "categories": req.categories,
        "experience": req.experience,
        "degree": req.degree,
        "price": req.price,
        "photo": req.photo,
        "bio": req.bio,
        "education": req.education,
        "services": req.services,
    });
    hash_credentials(&mut doc)?;
    creation_timestamps(&mut doc);

    let stored = state.store.create(Collection::Doctors, doc).await?;
    Ok((StatusCode::CREATED, Json(sanitize(stored))))
}

#[utoipa::path(
    patch,
    path = "/api/doctors/{id}",
    tag = "Doctors",
    summary = "Update a doctor",
    request_body(content = Object, description = "Fields to merge"),
    responses(
        (status = 200, description = "Updated record", body = Object),
        (status = 403, description = "Not permitted", body = super::schemas::ErrorResponse),
        (status = 404, description = "Not found", body = super::schemas::ErrorResponse),
    )
)]
pub async fn update_doctor(
    State(state): State<AppState>,
    axum::Extension(identity): axum::Extension<crate::auth::RequestIdentity>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Result<impl IntoResponse, ServerError> {
    if !policy::doctors::update(identity.caller(), &id) {
        return Err(ServerError::permission_denied());
    }
    let patch = scrub_patch(patch)?;
    let updated = state
        .store
        .update(Collection::Doctors, &id, patch)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("doctor {id}")))?;
    Ok(Json(sanitize(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/doctors/{id}",
    tag = "Doctors",
    summary = "Delete a doctor",
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Not permitted", body = super::schemas::ErrorResponse),
        (status = 404, description = "Not found", body = super::schemas::ErrorResponse),
    )
)]
pub async fn delete_doctor(
    State(state): State<AppState>,
    axum::Extension(identity): axum::Extension<crate::auth::RequestIdentity>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    if !policy::doctors::delete(identity.caller()) {
        return Err(ServerError::permission_denied());
    }
    if !state.store.delete(Collection::Doctors, &id).await? {
        return Err(ServerError::NotFound(format!("doctor {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_match_on_organisation_and_category() {
        let doc = json!({
            "id": "d1",
            "organisation": "org-1",
            "categories": ["cat-a", "cat-b"],
        });
        let by_org = ListDoctorsParams {
            organisation: Some("org-1".to_string()),
            ..Default::default()
        };
        let by_other_org = ListDoctorsParams {
            organisation: Some("org-2".to_string()),
            ..Default::default()
        };
        let by_category = ListDoctorsParams {
            category: Some("cat-b".to_string()),
            ..Default::default()
        };
        let by_both = ListDoctorsParams {
            organisation: Some("org-1".to_string()),
            category: Some("cat-c".to_string()),
        };
        assert!(matches_filters(&doc, &ListDoctorsParams::default()));
        assert!(matches_filters(&doc, &by_org));
        assert!(!matches_filters(&doc, &by_other_org));
        assert!(matches_filters(&doc, &by_category));
        assert!(!matches_filters(&doc, &by_both));
    }
}
