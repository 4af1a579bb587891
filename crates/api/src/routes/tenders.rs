//! Route definitions for tenders, their questions and responses.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{questions, responses, tenders};
use crate::state::AppState;

/// Public routes mounted at `/tenders`.
///
/// ```text
/// GET    /                  -> list_public
/// GET    /{id}              -> get_public
/// GET    /{id}/form         -> get_form
/// POST   /{id}/responses    -> submit_response
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(tenders::list_public))
        .route("/{id}", get(tenders::get_public))
        .route("/{id}/form", get(responses::get_form))
        .route("/{id}/responses", post(responses::submit_response))
}

/// Management routes mounted at `/admin/tenders`.
///
/// All routes require tender management capability (enforced by handler
/// extractors).
///
/// ```text
/// GET    /                                  -> list_admin
/// POST   /                                  -> create_tender
/// PUT    /{id}                              -> update_tender
/// DELETE /{id}                              -> delete_tender
/// POST   /{id}/toggle-active                -> toggle_active
/// GET    /{id}/questions                    -> list_questions
/// POST   /{id}/questions                    -> create_question
/// PUT    /{id}/questions/{question_id}      -> update_question
/// DELETE /{id}/questions/{question_id}      -> delete_question
/// POST   /{id}/questions/{question_id}/move -> move_question
/// GET    /{id}/responses                    -> list_responses
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(tenders::list_admin).post(tenders::create_tender))
        .route(
            "/{id}",
            put(tenders::update_tender).delete(tenders::delete_tender),
        )
        .route("/{id}/toggle-active", post(tenders::toggle_active))
        .route(
            "/{id}/questions",
            get(questions::list_questions).post(questions::create_question),
        )
        .route(
            "/{id}/questions/{question_id}",
            put(questions::update_question).delete(questions::delete_question),
        )
        .route(
            "/{id}/questions/{question_id}/move",
            post(questions::move_question),
        )
        .route("/{id}/responses", get(responses::list_responses))
}
