//! Admin-panel access gate.
//!
//! The dashboard front-end probes this endpoint before rendering; only
//! admin-role users get in. The response reports which collections the
//! panel exposes, driven by the same predicates the mutations use.

use axum::Json;
use axum::response::IntoResponse;
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::error::ServerError;
use crate::policy;

/// Admin-panel capability report.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminAccessResponse {
    /// Role name of the caller that passed the gate.
    #[schema(example = "admin")]
    pub role: String,
    /// Which collections the panel may manage, keyed by collection slug.
    pub collections: BTreeMap<String, bool>,
}

#[utoipa::path(
    get,
    path = "/api/admin/access",
    tag = "Admin",
    summary = "Check admin-panel access",
    responses(
        (status = 200, description = "Caller may use the panel", body = AdminAccessResponse),
        (status = 403, description = "Caller may not", body = super::schemas::ErrorResponse),
    )
)]
pub async fn admin_access(
    axum::Extension(identity): axum::Extension<crate::auth::RequestIdentity>,
) -> Result<impl IntoResponse, ServerError> {
    let caller = identity.caller();
    if !policy::users::admin_panel(caller) {
        return Err(ServerError::permission_denied());
    }

    let collections = BTreeMap::from([
        ("users".to_string(), policy::users::admin_panel(caller)),
        ("doctors".to_string(), policy::doctors::admin_panel(caller)),
        (
            "organisations".to_string(),
            policy::organisations::admin_panel(caller),
        ),
    ]);

    let role = caller.map_or_else(String::new, |c| c.role_name().to_string());
    Ok(Json(AdminAccessResponse { role, collections }))
}
