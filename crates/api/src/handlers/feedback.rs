//! Handlers for the contact form.
//!
//! Anyone may submit. Triage is open to every admin console user.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use rada_core::error::CoreError;
use rada_core::feedback::{self, FeedbackDraft};
use rada_core::types::DbId;
use rada_db::models::feedback::{CreateFeedback, FeedbackListParams, UpdateFeedback};
use rada_db::repositories::FeedbackRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::rbac::RequireConsoleAccess;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /feedback
// ---------------------------------------------------------------------------

pub async fn submit_feedback(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateFeedback>,
) -> AppResult<impl IntoResponse> {
    feedback::validate_draft(&FeedbackDraft {
        name: input.name.trim().to_string(),
        email: input.email.trim().to_string(),
        subject: input.subject.trim().to_string(),
        message: input.message.trim().to_string(),
    })?;
    let message_type = input
        .message_type
        .as_deref()
        .unwrap_or(feedback::DEFAULT_MESSAGE_TYPE);
    feedback::validate_message_type(message_type)?;

    let created =
        FeedbackRepo::create(&state.pool, viewer.identity_id(), message_type, &input).await?;

    tracing::info!(
        feedback_id = created.id,
        message_type,
        submitter_id = ?viewer.identity_id(),
        "Feedback received"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// GET /admin/feedback
// ---------------------------------------------------------------------------

pub async fn list_feedback(
    RequireConsoleAccess(_user): RequireConsoleAccess,
    State(state): State<AppState>,
    Query(params): Query<FeedbackListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref status) = params.status {
        feedback::validate_status(status)?;
    }
    let entries = FeedbackRepo::list(&state.pool, params.status.as_deref()).await?;
    Ok(Json(DataResponse { data: entries }))
}

// ---------------------------------------------------------------------------
// PUT /admin/feedback/{id}
// ---------------------------------------------------------------------------

pub async fn update_feedback(
    RequireConsoleAccess(user): RequireConsoleAccess,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFeedback>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref status) = input.status {
        feedback::validate_status(status)?;
    }

    let updated = FeedbackRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Feedback",
            id,
        }))?;

    tracing::info!(
        identity_id = user.identity_id,
        feedback_id = id,
        status = %updated.status,
        "Feedback updated"
    );

    Ok(Json(DataResponse { data: updated }))
}
