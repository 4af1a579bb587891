//! Route definitions for contact-form feedback.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::feedback;
use crate::state::AppState;

/// Public routes mounted at `/feedback`.
///
/// ```text
/// POST /  -> submit_feedback
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new().route("/", post(feedback::submit_feedback))
}

/// Triage routes mounted at `/admin/feedback`.
///
/// ```text
/// GET /       -> list_feedback
/// PUT /{id}   -> update_feedback
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(feedback::list_feedback))
        .route("/{id}", put(feedback::update_feedback))
}
