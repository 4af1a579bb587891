//! Route definitions for the `/admin/roles` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::roles;
use crate::state::AppState;

/// Routes mounted at `/admin/roles`.
///
/// All routes require the `administrator` role.
///
/// ```text
/// GET    /                        -> list_roles
/// POST   /                        -> assign_role
/// DELETE /{identity_id}/{role}    -> revoke_role
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(roles::list_roles).post(roles::assign_role))
        .route("/{identity_id}/{role}", delete(roles::revoke_role))
}
