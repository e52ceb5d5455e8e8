use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use medway_core::Collection;

use super::AppState;

const COLLECTIONS: [Collection; 5] = [
    Collection::Users,
    Collection::Doctors,
    Collection::Organisations,
    Collection::DoctorCategories,
    Collection::Media,
];

/// Health check payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    /// Document counts per collection; a probe of store reachability.
    pub collections: BTreeMap<String, usize>,
}

/// `GET /health` -- liveness plus a store reachability probe.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    summary = "Health check",
    description = "Returns service status and per-collection document counts.",
    responses(
        (status = 200, description = "Service and store are healthy", body = HealthResponse),
        (status = 503, description = "Store unreachable"),
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let mut collections = BTreeMap::new();
    for collection in COLLECTIONS {
        match state.store.count(collection).await {
            Ok(count) => {
                collections.insert(collection.as_str().to_string(), count);
            }
            Err(e) => {
                tracing::warn!(collection = collection.as_str(), error = %e, "health probe failed");
                return (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(serde_json::json!({"status": "degraded"})),
                )
                    .into_response();
            }
        }
    }

    let body = HealthResponse {
        status: "ok".into(),
        collections,
    };
    (StatusCode::OK, Json(body)).into_response()
}
