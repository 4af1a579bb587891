//! Handlers for tenders.
//!
//! Public listing shows active tenders only. Management endpoints require
//! tender management capability.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use rada_core::error::CoreError;
use rada_core::tender;
use rada_core::types::DbId;
use rada_db::models::tender::{
    CreateTender, Tender, TenderListParams, TenderSearchParams, UpdateTender,
};
use rada_db::repositories::TenderRepo;
use rada_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireTenderManager;
use crate::response::DataResponse;
use crate::state::AppState;

/// Load a tender by id or fail with 404.
pub(crate) async fn ensure_tender_exists(pool: &DbPool, id: DbId) -> AppResult<Tender> {
    TenderRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tender",
            id,
        }))
}

// ---------------------------------------------------------------------------
// GET /tenders
// ---------------------------------------------------------------------------

/// List active tenders, newest first, optionally filtered by `?q=`.
pub async fn list_public(
    State(state): State<AppState>,
    Query(params): Query<TenderSearchParams>,
) -> AppResult<impl IntoResponse> {
    let search = tender::normalize_search(params.q.as_deref())?;
    let tenders = TenderRepo::list_active(&state.pool, search.as_deref()).await?;
    Ok(Json(DataResponse { data: tenders }))
}

// ---------------------------------------------------------------------------
// GET /tenders/{id}
// ---------------------------------------------------------------------------

pub async fn get_public(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let tender = TenderRepo::find_active(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tender",
            id,
        }))?;
    Ok(Json(DataResponse { data: tender }))
}

// ---------------------------------------------------------------------------
// GET /admin/tenders
// ---------------------------------------------------------------------------

/// List all tenders. `?has_form=true` narrows to form-enabled tenders ordered
/// by title.
pub async fn list_admin(
    RequireTenderManager(_user): RequireTenderManager,
    State(state): State<AppState>,
    Query(params): Query<TenderListParams>,
) -> AppResult<impl IntoResponse> {
    let tenders = TenderRepo::list_all(&state.pool, params.has_form).await?;
    Ok(Json(DataResponse { data: tenders }))
}

// ---------------------------------------------------------------------------
// POST /admin/tenders
// ---------------------------------------------------------------------------

pub async fn create_tender(
    RequireTenderManager(user): RequireTenderManager,
    State(state): State<AppState>,
    Json(input): Json<CreateTender>,
) -> AppResult<impl IntoResponse> {
    tender::validate_title(&input.title)?;
    tender::validate_content(&input.content)?;

    let created = TenderRepo::create(&state.pool, &input).await?;

    tracing::info!(
        identity_id = user.identity_id,
        tender_id = created.id,
        "Tender created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// PUT /admin/tenders/{id}
// ---------------------------------------------------------------------------

pub async fn update_tender(
    RequireTenderManager(user): RequireTenderManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTender>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref title) = input.title {
        tender::validate_title(title)?;
    }
    if let Some(ref content) = input.content {
        tender::validate_content(content)?;
    }

    let updated = TenderRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tender",
            id,
        }))?;

    tracing::info!(identity_id = user.identity_id, tender_id = id, "Tender updated");

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// POST /admin/tenders/{id}/toggle-active
// ---------------------------------------------------------------------------

pub async fn toggle_active(
    RequireTenderManager(user): RequireTenderManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let updated = TenderRepo::toggle_active(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tender",
            id,
        }))?;

    tracing::info!(
        identity_id = user.identity_id,
        tender_id = id,
        is_active = updated.is_active,
        "Tender visibility toggled"
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /admin/tenders/{id}
// ---------------------------------------------------------------------------

/// Delete a tender and its questions. Submitted responses are kept.
pub async fn delete_tender(
    RequireTenderManager(user): RequireTenderManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TenderRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Tender",
            id,
        }));
    }

    tracing::info!(identity_id = user.identity_id, tender_id = id, "Tender deleted");

    Ok(StatusCode::NO_CONTENT)
}
