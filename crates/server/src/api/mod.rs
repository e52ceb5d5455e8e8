pub mod admin;
pub mod categories;
pub mod doctors;
pub mod health;
pub mod media;
pub mod openapi;
pub mod organisations;
pub mod schemas;
pub mod session;
pub mod users;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use chrono::Utc;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use medway_store::DocumentStore;

use crate::auth::middleware::IdentityLayer;
use crate::auth::password::hash_password;
use crate::auth::token::TokenCodec;
use crate::error::ServerError;

use self::openapi::ApiDoc;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The document store backing every collection.
    pub store: Arc<dyn DocumentStore>,
    /// Session token signer/verifier.
    pub codec: Arc<TokenCodec>,
    /// Base path the API is nested under; also the session cookie path.
    pub base_path: String,
}

/// Replace a plaintext `password` field with its `password_hash`.
///
/// Plaintext never reaches the store.
pub(crate) fn hash_credentials(doc: &mut Value) -> Result<(), ServerError> {
    let Some(fields) = doc.as_object_mut() else {
        return Ok(());
    };
    if let Some(password) = fields.remove("password") {
        let Some(password) = password.as_str().filter(|p| !p.is_empty()) else {
            return Err(ServerError::BadRequest("password must not be empty".to_owned()));
        };
        let hash = hash_password(password)
            .map_err(|e| ServerError::Internal(format!("password hashing failed: {e}")))?;
        fields.insert("password_hash".to_owned(), Value::String(hash));
    }
    Ok(())
}

/// Stamp `created_at` / `updated_at` on a new document.
pub(crate) fn creation_timestamps(doc: &mut Value) {
    if let Some(fields) = doc.as_object_mut() {
        let now = Value::String(Utc::now().to_rfc3339());
        fields.insert("created_at".to_owned(), now.clone());
        fields.insert("updated_at".to_owned(), now);
    }
}

/// Prepare a client-supplied patch for a shallow merge.
///
/// Server-managed fields are dropped, a plaintext `password` is re-hashed,
/// and `updated_at` is refreshed.
pub(crate) fn scrub_patch(patch: Value) -> Result<Value, ServerError> {
    let Value::Object(mut fields) = patch else {
        return Err(ServerError::BadRequest("expected a JSON object".to_owned()));
    };
    fields.remove("id");
    fields.remove("created_at");
    fields.remove("password_hash");
    if let Some(password) = fields.remove("password") {
        let Some(password) = password.as_str().filter(|p| !p.is_empty()) else {
            return Err(ServerError::BadRequest("password must not be empty".to_owned()));
        };
        let hash = hash_password(password)
            .map_err(|e| ServerError::Internal(format!("password hashing failed: {e}")))?;
        fields.insert("password_hash".to_owned(), Value::String(hash));
    }
    fields.insert(
        "updated_at".to_owned(),
        Value::String(Utc::now().to_rfc3339()),
    );
    Ok(Value::Object(fields))
}

/// Build the Axum router with all API routes, middleware, and Swagger UI.
#[allow(clippy::too_many_lines)]
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        // Session lifecycle, one set per auth collection. Static segments
        // take precedence over the `{id}` captures below.
        .route("/api/users/login", post(session::users_login))
        .route("/api/users/logout", post(session::users_logout))
        .route("/api/users/me", get(session::users_me))
        .route("/api/doctors/login", post(session::doctors_login))
        .route("/api/doctors/logout", post(session::doctors_logout))
        .route("/api/doctors/me", get(session::doctors_me))
        .route(
            "/api/organisations/login",
            post(session::organisations_login),
        )
        .route(
            "/api/organisations/logout",
            post(session::organisations_logout),
        )
        .route("/api/organisations/me", get(session::organisations_me))
        // Users
        .route(
            "/api/users",
            get(users::list_users).post(users::create_user),
        )
        .route(
            "/api/users/{id}",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        // Doctors
        .route(
            "/api/doctors",
            get(doctors::list_doctors).post(doctors::create_doctor),
        )
        .route(
            "/api/doctors/{id}",
            get(doctors::get_doctor)
                .patch(doctors::update_doctor)
                .delete(doctors::delete_doctor),
        )
        // Organisations
        .route(
            "/api/organisations",
            get(organisations::list_organisations).post(organisations::create_organisation),
        )
        .route(
            "/api/organisations/{id}",
            get(organisations::get_organisation)
                .patch(organisations::update_organisation)
                .delete(organisations::delete_organisation),
        )
        // Doctor categories
        .route(
            "/api/doctor-categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/api/doctor-categories/{id}",
            get(categories::get_category)
                .patch(categories::update_category)
                .delete(categories::delete_category),
        )
        // Media
        .route(
            "/api/media",
            get(media::list_media).post(media::create_media),
        )
        .route(
            "/api/media/{id}",
            get(media::get_media)
                .patch(media::update_media)
                .delete(media::delete_media),
        )
        // Admin panel gate
        .route("/api/admin/access", get(admin::admin_access))
        // Identity rehydration runs on every API request; handlers consult
        // the attached extension, the layer itself never rejects.
        .layer(IdentityLayer::new(
            Arc::clone(&state.codec),
            Arc::clone(&state.store),
        ));

    let api = if state.base_path.is_empty() {
        api
    } else {
        Router::new().nest(&state.base_path, api)
    };

    Router::new()
        .route("/health", get(health::health))
        .merge(api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
