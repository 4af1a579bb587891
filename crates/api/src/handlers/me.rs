//! Capabilities of the current caller, for UI gating.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use rada_core::roles::{Capabilities, RoleSet};
use rada_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::rbac::resolve_roles;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response payload for `GET /me/capabilities`.
#[derive(Debug, Serialize)]
pub struct CapabilitiesResponse {
    pub identity_id: Option<DbId>,
    pub roles: RoleSet,
    pub capabilities: Capabilities,
    /// `true` when the role lookup failed and nothing was granted.
    pub unavailable: bool,
}

/// GET /me/capabilities
///
/// Advisory only: every guarded route re-checks on its own.
pub async fn get_capabilities(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let identity_id = viewer.identity_id();
    let resolution = resolve_roles(&state.pool, identity_id).await;
    let capabilities = resolution.capabilities();

    Ok(Json(DataResponse {
        data: CapabilitiesResponse {
            identity_id,
            roles: resolution.roles,
            capabilities,
            unavailable: resolution.unavailable,
        },
    }))
}
