//! Handlers for a tender's form questions.
//!
//! All endpoints require tender management capability and are scoped to
//! the tender in the path.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use rada_core::error::CoreError;
use rada_core::question::{self, build_kind, patch_kind};
use rada_core::types::DbId;
use rada_db::models::question::{CreateQuestion, MoveQuestion, QuestionChanges, UpdateQuestion};
use rada_db::repositories::QuestionRepo;

use super::tenders::ensure_tender_exists;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireTenderManager;
use crate::response::DataResponse;
use crate::state::AppState;

fn question_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Question",
        id,
    })
}

// ---------------------------------------------------------------------------
// GET /admin/tenders/{id}/questions
// ---------------------------------------------------------------------------

/// List questions in display order. An empty list means no form yet.
pub async fn list_questions(
    RequireTenderManager(_user): RequireTenderManager,
    State(state): State<AppState>,
    Path(tender_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_tender_exists(&state.pool, tender_id).await?;
    let questions = QuestionRepo::list_by_tender(&state.pool, tender_id).await?;
    Ok(Json(DataResponse { data: questions }))
}

// ---------------------------------------------------------------------------
// POST /admin/tenders/{id}/questions
// ---------------------------------------------------------------------------

pub async fn create_question(
    RequireTenderManager(user): RequireTenderManager,
    State(state): State<AppState>,
    Path(tender_id): Path<DbId>,
    Json(input): Json<CreateQuestion>,
) -> AppResult<impl IntoResponse> {
    question::validate_question_text(&input.text)?;
    if let Some(position) = input.position {
        question::validate_position(position)?;
    }
    let kind = build_kind(&input.question_type, input.choices)?;

    ensure_tender_exists(&state.pool, tender_id).await?;

    let created = QuestionRepo::create(
        &state.pool,
        tender_id,
        input.text.trim(),
        &kind,
        input.required.unwrap_or(false),
        input.position,
    )
    .await?;

    tracing::info!(
        identity_id = user.identity_id,
        tender_id,
        question_id = created.id,
        question_type = kind.question_type().as_str(),
        "Question created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// PUT /admin/tenders/{id}/questions/{question_id}
// ---------------------------------------------------------------------------

/// Partial update. Changing to a text type clears choices; changing to an
/// enumerated type without choices keeps existing ones (or none).
pub async fn update_question(
    RequireTenderManager(user): RequireTenderManager,
    State(state): State<AppState>,
    Path((tender_id, question_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateQuestion>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref text) = input.text {
        question::validate_question_text(text)?;
    }
    if let Some(position) = input.position {
        question::validate_position(position)?;
    }

    let existing = QuestionRepo::find_by_id(&state.pool, tender_id, question_id)
        .await?
        .ok_or_else(|| question_not_found(question_id))?;

    let kind = if input.question_type.is_some() || input.choices.is_some() {
        Some(patch_kind(
            &existing.kind,
            input.question_type.as_deref(),
            input.choices,
        )?)
    } else {
        None
    };

    let changes = QuestionChanges {
        text: input.text.map(|t| t.trim().to_string()),
        kind,
        required: input.required,
        position: input.position,
    };

    let updated = QuestionRepo::update(&state.pool, tender_id, question_id, &changes)
        .await?
        .ok_or_else(|| question_not_found(question_id))?;

    tracing::info!(
        identity_id = user.identity_id,
        tender_id,
        question_id,
        "Question updated"
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /admin/tenders/{id}/questions/{question_id}
// ---------------------------------------------------------------------------

/// Hard delete. Remaining positions are not renumbered and stored answers
/// for this question are left as they are.
pub async fn delete_question(
    RequireTenderManager(user): RequireTenderManager,
    State(state): State<AppState>,
    Path((tender_id, question_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = QuestionRepo::delete(&state.pool, tender_id, question_id).await?;
    if !deleted {
        return Err(question_not_found(question_id));
    }

    tracing::info!(
        identity_id = user.identity_id,
        tender_id,
        question_id,
        "Question deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// POST /admin/tenders/{id}/questions/{question_id}/move
// ---------------------------------------------------------------------------

/// Move a question one step. Returns the full list in its new order; a move
/// past either end returns it unchanged.
pub async fn move_question(
    RequireTenderManager(user): RequireTenderManager,
    State(state): State<AppState>,
    Path((tender_id, question_id)): Path<(DbId, DbId)>,
    Json(input): Json<MoveQuestion>,
) -> AppResult<impl IntoResponse> {
    let questions =
        QuestionRepo::move_question(&state.pool, tender_id, question_id, input.direction)
            .await?
            .ok_or_else(|| question_not_found(question_id))?;

    tracing::info!(
        identity_id = user.identity_id,
        tender_id,
        question_id,
        direction = ?input.direction,
        "Question moved"
    );

    Ok(Json(DataResponse { data: questions }))
}
