//! Handlers for the application form and submitted responses.
//!
//! Submission drives a server-side [`FormSession`] through the same
//! load, answer and submit steps a browser session goes through, so the
//! required-answer and shape rules live in one place.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use rada_core::answer::Answers;
use rada_core::error::CoreError;
use rada_core::form::{render, FormSession, RenderedField};
use rada_core::response_view::{build_view, ResponseView};
use rada_core::types::DbId;
use rada_db::models::tender::Tender;
use rada_db::repositories::{QuestionRepo, ResponseRepo, TenderRepo};
use rada_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::rbac::RequireTenderManager;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /tenders/{id}/responses`.
#[derive(Debug, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub answers: Answers,
}

/// Rendered application form for one tender.
#[derive(Debug, Serialize)]
pub struct FormView {
    pub tender_id: DbId,
    pub title: String,
    pub fields: Vec<RenderedField>,
}

/// Load a tender that accepts applications: active and form-enabled.
async fn find_open_tender(pool: &DbPool, id: DbId) -> AppResult<Tender> {
    TenderRepo::find_active(pool, id)
        .await?
        .filter(|t| t.has_form)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tender",
            id,
        }))
}

// ---------------------------------------------------------------------------
// GET /tenders/{id}/form
// ---------------------------------------------------------------------------

/// Return the form's fields in display order, each with its widget.
pub async fn get_form(
    State(state): State<AppState>,
    Path(tender_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let tender = find_open_tender(&state.pool, tender_id).await?;
    let schema = QuestionRepo::list_by_tender(&state.pool, tender_id).await?;

    Ok(Json(DataResponse {
        data: FormView {
            tender_id,
            title: tender.title,
            fields: render(&schema, &Answers::new()),
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /tenders/{id}/responses
// ---------------------------------------------------------------------------

/// Submit an application.
///
/// Every required question must have a non-empty answer; all violations are
/// reported together under `missing`. The record is written in one insert.
pub async fn submit_response(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    Path(tender_id): Path<DbId>,
    Json(input): Json<SubmitResponse>,
) -> AppResult<impl IntoResponse> {
    let submitter_id = viewer.identity_id();
    if submitter_id.is_none() && !state.config.allow_anonymous_submissions {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Sign in to submit an application".into(),
        )));
    }

    find_open_tender(&state.pool, tender_id).await?;

    let mut session = FormSession::new(tender_id);
    session.ready(QuestionRepo::list_by_tender(&state.pool, tender_id).await?)?;
    for (question_id, answer) in input.answers {
        session.set_answer(question_id, answer)?;
    }

    let submission = session.begin_submit(submitter_id)?;
    match ResponseRepo::create(&state.pool, &submission).await {
        Ok(record) => {
            session.submit_succeeded()?;
            tracing::info!(
                tender_id,
                response_id = record.id,
                submitter_id = ?submitter_id,
                answer_count = record.answers.0.len(),
                "Application submitted"
            );
            Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
        }
        Err(e) => {
            session.submit_failed(e.to_string())?;
            tracing::warn!(
                tender_id,
                submitter_id = ?submitter_id,
                error = %e,
                "Application submission failed"
            );
            Err(e.into())
        }
    }
}

// ---------------------------------------------------------------------------
// GET /admin/tenders/{id}/responses
// ---------------------------------------------------------------------------

/// List submitted records newest first, each rendered against the current
/// schema. Answers to deleted questions appear under a placeholder label.
///
/// Records outlive their tender, so a deleted tender is not an error: its
/// schema is empty and every answer renders under the placeholder.
pub async fn list_responses(
    RequireTenderManager(_user): RequireTenderManager,
    State(state): State<AppState>,
    Path(tender_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let schema = QuestionRepo::list_by_tender(&state.pool, tender_id).await?;
    let records = ResponseRepo::list_by_tender(&state.pool, tender_id).await?;

    let views: Vec<ResponseView> = records
        .iter()
        .map(|r| {
            build_view(
                &schema,
                r.id,
                r.tender_id,
                r.submitter_id,
                r.submitted_at,
                &r.answers.0,
            )
        })
        .collect();

    Ok(Json(DataResponse { data: views }))
}
