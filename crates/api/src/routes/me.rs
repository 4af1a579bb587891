//! Route definitions for the `/me` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::me;
use crate::state::AppState;

/// Routes mounted at `/me`.
///
/// ```text
/// GET /capabilities -> get_capabilities
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/capabilities", get(me::get_capabilities))
}
