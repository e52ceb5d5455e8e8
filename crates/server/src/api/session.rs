//! Session lifecycle endpoints.
//!
//! Each auth collection gets its own login, logout, and me endpoint. The
//! three sets share the same implementation parameterised by collection;
//! only the cookie name and the claim shape differ.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};

use medway_core::{Collection, Role};

use crate::auth::cookie::{clearing_cookie, cookie_value, session_cookie};
use crate::auth::password::verify_password;
use crate::auth::resolver::resolve_only;
use crate::error::ServerError;

use super::AppState;
use super::schemas::{LoginRequest, LoginResponse, MeResponse, MessageResponse, sanitize};

/// Authenticate against one auth collection and set its session cookie.
async fn login(
    state: AppState,
    collection: Collection,
    req: LoginRequest,
) -> Result<impl IntoResponse, ServerError> {
    let Some(record) = state.store.find_by_email(collection, &req.email).await? else {
        return Err(ServerError::invalid_credentials());
    };

    let stored_hash = record
        .get("password_hash")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    if !verify_password(stored_hash, &req.password) {
        return Err(ServerError::invalid_credentials());
    }

    let id = record
        .get("id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ServerError::Internal("stored document has no id".to_string()))?
        .to_string();
    let email = record.get("email").and_then(|v| v.as_str()).map(String::from);
    // Only user accounts carry a role claim; doctors and organisations are
    // typed by their collection alone.
    let role = (collection == Collection::Users).then(|| {
        record
            .get("role")
            .and_then(|v| v.as_str())
            .and_then(Role::from_str_loose)
            .unwrap_or_default()
    });

    let (token, exp) = state
        .codec
        .issue(&id, collection, role, email)
        .map_err(|e| ServerError::Internal(format!("failed to sign session token: {e}")))?;

    let name = collection
        .cookie_name()
        .ok_or_else(ServerError::permission_denied)?;
    let expires_at = i64::try_from(exp)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now);
    let cookie = session_cookie(name, &token, expires_at, &state.base_path);

    tracing::info!(collection = collection.as_str(), id = %id, "session opened");

    let body = LoginResponse {
        token,
        user: sanitize(record),
        exp,
        message: "login successful".to_string(),
    };
    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(body)))
}

/// Clear one auth collection's session cookie.
///
/// Always succeeds; logging out without a session is a no-op.
fn logout(state: &AppState, collection: Collection) -> Result<impl IntoResponse + use<>, ServerError> {
    let name = collection
        .cookie_name()
        .ok_or_else(ServerError::permission_denied)?;
    let cookie = clearing_cookie(name, &state.base_path);
    let body = MessageResponse {
        message: "logged out".to_string(),
    };
    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(body)))
}

/// Return the current session for one auth collection.
///
/// Resolution is restricted to the named collection's cookie; a valid
/// session in a sibling collection reports `user: null` here.
async fn me(
    state: AppState,
    collection: Collection,
    headers: HeaderMap,
) -> Result<Json<MeResponse>, ServerError> {
    let Some(caller) = resolve_only(&headers, &state.codec, collection) else {
        return Ok(Json(MeResponse { user: None }));
    };
    let record = state.store.find_by_id(collection, caller.id()).await?;
    Ok(Json(MeResponse {
        user: record.map(sanitize),
    }))
}

/// Report whether the named collection's cookie is present at all.
///
/// Used by logout telemetry only; absence is not an error.
fn has_cookie(headers: &HeaderMap, collection: Collection) -> bool {
    collection
        .cookie_name()
        .is_some_and(|name| cookie_value(headers, name).is_some())
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "Sessions",
    summary = "Log in as a user",
    request_body(content = LoginRequest, description = "User credentials"),
    responses(
        (status = 200, description = "Session opened", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = super::schemas::ErrorResponse),
    )
)]
pub async fn users_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ServerError> {
    login(state, Collection::Users, req).await
}

#[utoipa::path(
    post,
    path = "/api/users/logout",
    tag = "Sessions",
    summary = "Log out the user session",
    responses((status = 200, description = "Cookie cleared", body = MessageResponse))
)]
pub async fn users_logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServerError> {
    if has_cookie(&headers, Collection::Users) {
        tracing::debug!(collection = "users", "session closed");
    }
    logout(&state, Collection::Users)
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Sessions",
    summary = "Current user session",
    responses((status = 200, description = "Session state", body = MeResponse))
)]
pub async fn users_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MeResponse>, ServerError> {
    me(state, Collection::Users, headers).await
}

// ---------------------------------------------------------------------------
// Doctors
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/doctors/login",
    tag = "Sessions",
    summary = "Log in as a doctor",
    request_body(content = LoginRequest, description = "Doctor credentials"),
    responses(
        (status = 200, description = "Session opened", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = super::schemas::ErrorResponse),
    )
)]
pub async fn doctors_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ServerError> {
    login(state, Collection::Doctors, req).await
}

#[utoipa::path(
    post,
    path = "/api/doctors/logout",
    tag = "Sessions",
    summary = "Log out the doctor session",
    responses((status = 200, description = "Cookie cleared", body = MessageResponse))
)]
pub async fn doctors_logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServerError> {
    if has_cookie(&headers, Collection::Doctors) {
        tracing::debug!(collection = "doctors", "session closed");
    }
    logout(&state, Collection::Doctors)
}

#[utoipa::path(
    get,
    path = "/api/doctors/me",
    tag = "Sessions",
    summary = "Current doctor session",
    responses((status = 200, description = "Session state", body = MeResponse))
)]
pub async fn doctors_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MeResponse>, ServerError> {
    me(state, Collection::Doctors, headers).await
}

// ---------------------------------------------------------------------------
// Organisations
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/organisations/login",
    tag = "Sessions",
    summary = "Log in as an organisation",
    request_body(content = LoginRequest, description = "Organisation credentials"),
    responses(
        (status = 200, description = "Session opened", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = super::schemas::ErrorResponse),
    )
)]
pub async fn organisations_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ServerError> {
    login(state, Collection::Organisations, req).await
}

#[utoipa::path(
    post,
    path = "/api/organisations/logout",
    tag = "Sessions",
    summary = "Log out the organisation session",
    responses((status = 200, description = "Cookie cleared", body = MessageResponse))
)]
pub async fn organisations_logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServerError> {
    if has_cookie(&headers, Collection::Organisations) {
        tracing::debug!(collection = "organisations", "session closed");
    }
    logout(&state, Collection::Organisations)
}

#[utoipa::path(
    get,
    path = "/api/organisations/me",
    tag = "Sessions",
    summary = "Current organisation session",
    responses((status = 200, description = "Session state", body = MeResponse))
)]
pub async fn organisations_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MeResponse>, ServerError> {
    me(state, Collection::Organisations, headers).await
}
