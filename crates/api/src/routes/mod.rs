pub mod feedback;
pub mod health;
pub mod me;
pub mod roles;
pub mod tenders;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /me/capabilities                                  roles + capabilities of the caller
///
/// /tenders                                          list active (public, ?q=)
/// /tenders/{id}                                     get active tender
/// /tenders/{id}/form                                rendered application form
/// /tenders/{id}/responses                           submit application (POST)
///
/// /feedback                                         submit contact message (POST)
///
/// /admin/tenders                                    list (?has_form=), create
/// /admin/tenders/{id}                               update, delete
/// /admin/tenders/{id}/toggle-active                 flip visibility (POST)
/// /admin/tenders/{id}/questions                     list, create
/// /admin/tenders/{id}/questions/{question_id}       update, delete
/// /admin/tenders/{id}/questions/{question_id}/move  move up/down (POST)
/// /admin/tenders/{id}/responses                     submitted records
///
/// /admin/roles                                      list, assign (administrator)
/// /admin/roles/{identity_id}/{role}                 revoke (DELETE)
///
/// /admin/feedback                                   list (?status=)
/// /admin/feedback/{id}                              triage (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Caller capabilities for UI gating.
        .nest("/me", me::router())
        // Public tender board and application forms.
        .nest("/tenders", tenders::public_router())
        // Public contact form.
        .nest("/feedback", feedback::public_router())
        // Tender, question and response management.
        .nest("/admin/tenders", tenders::admin_router())
        // Role assignment management.
        .nest("/admin/roles", roles::router())
        // Feedback triage.
        .nest("/admin/feedback", feedback::admin_router())
}
