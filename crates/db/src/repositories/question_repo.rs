//! Repository for the `tender_questions` table.

use rada_core::question::{Question, QuestionKind};
use rada_core::reorder::{plan_move, renumber, Direction};
use rada_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::question::{QuestionChanges, QuestionRow};

/// Column list for `tender_questions` queries.
const COLUMNS: &str = "id, tender_id, text, question_type, choices, required, position, \
    created_at, updated_at";

/// Provides CRUD and reordering for form questions.
pub struct QuestionRepo;

impl QuestionRepo {
    /// List a tender's questions in display order.
    pub async fn list_by_tender(
        pool: &PgPool,
        tender_id: DbId,
    ) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tender_questions \
             WHERE tender_id = $1 \
             ORDER BY position ASC, id ASC"
        );
        let rows = sqlx::query_as::<_, QuestionRow>(&query)
            .bind(tender_id)
            .fetch_all(pool)
            .await?;
        decode_all(rows)
    }

    /// Find one question belonging to `tender_id`.
    pub async fn find_by_id(
        pool: &PgPool,
        tender_id: DbId,
        id: DbId,
    ) -> Result<Option<Question>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM tender_questions WHERE id = $1 AND tender_id = $2");
        let row = sqlx::query_as::<_, QuestionRow>(&query)
            .bind(id)
            .bind(tender_id)
            .fetch_optional(pool)
            .await?;
        row.map(decode).transpose()
    }

    /// Insert a question. Without an explicit `position` it is appended
    /// after the tender's current questions.
    pub async fn create(
        pool: &PgPool,
        tender_id: DbId,
        text: &str,
        kind: &QuestionKind,
        required: bool,
        position: Option<i32>,
    ) -> Result<Question, sqlx::Error> {
        let (question_type, choices) = kind.to_parts();
        let query = format!(
            "INSERT INTO tender_questions \
                (tender_id, text, question_type, choices, required, position) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, \
                (SELECT COALESCE(MAX(position) + 1, 0) \
                 FROM tender_questions WHERE tender_id = $1))) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, QuestionRow>(&query)
            .bind(tender_id)
            .bind(text)
            .bind(question_type)
            .bind(choices)
            .bind(required)
            .bind(position)
            .fetch_one(pool)
            .await?;
        decode(row)
    }

    /// Apply validated changes. A new `kind` replaces the type and the
    /// choice column together, clearing choices for text kinds.
    pub async fn update(
        pool: &PgPool,
        tender_id: DbId,
        id: DbId,
        changes: &QuestionChanges,
    ) -> Result<Option<Question>, sqlx::Error> {
        let (question_type, choices) = match &changes.kind {
            Some(kind) => {
                let (ty, choices) = kind.to_parts();
                (Some(ty), choices)
            }
            None => (None, None),
        };
        let query = format!(
            "UPDATE tender_questions SET \
                text = COALESCE($3, text), \
                question_type = COALESCE($4, question_type), \
                choices = CASE WHEN $4::TEXT IS NULL THEN choices ELSE $5::TEXT[] END, \
                required = COALESCE($6, required), \
                position = COALESCE($7, position) \
             WHERE id = $1 AND tender_id = $2 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, QuestionRow>(&query)
            .bind(id)
            .bind(tender_id)
            .bind(&changes.text)
            .bind(question_type)
            .bind(choices)
            .bind(changes.required)
            .bind(changes.position)
            .fetch_optional(pool)
            .await?;
        row.map(decode).transpose()
    }

    /// Delete a question. Submitted answers that reference it are untouched.
    pub async fn delete(pool: &PgPool, tender_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tender_questions WHERE id = $1 AND tender_id = $2")
            .bind(id)
            .bind(tender_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Move a question one step up or down by swapping positions with its
    /// neighbour.
    ///
    /// The tender's questions are locked for the duration so both writes
    /// land together or not at all. Moving past either end is a no-op.
    /// Returns the reordered list, or `None` if the question does not
    /// belong to the tender.
    pub async fn move_question(
        pool: &PgPool,
        tender_id: DbId,
        question_id: DbId,
        direction: Direction,
    ) -> Result<Option<Vec<Question>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT {COLUMNS} FROM tender_questions \
             WHERE tender_id = $1 \
             ORDER BY position ASC, id ASC \
             FOR UPDATE"
        );
        let rows = sqlx::query_as::<_, QuestionRow>(&query)
            .bind(tender_id)
            .fetch_all(&mut *tx)
            .await?;
        let mut ordered = decode_all(rows)?;

        if !ordered.iter().any(|q| q.id == question_id) {
            return Ok(None);
        }

        if let Some(positions) = renumber(&ordered) {
            for &(id, position) in &positions {
                set_position(&mut *tx, id, position).await?;
            }
            for (question, (_, position)) in ordered.iter_mut().zip(positions) {
                question.position = position;
            }
        }

        if let Ok(Some(swap)) = plan_move(&ordered, question_id, direction) {
            set_position(&mut *tx, swap.first_id, swap.first_position).await?;
            set_position(&mut *tx, swap.second_id, swap.second_position).await?;
            tracing::debug!(
                tender_id,
                question_id,
                neighbour_id = swap.second_id,
                "Question positions swapped"
            );
        }

        let reordered = sqlx::query_as::<_, QuestionRow>(&format!(
            "SELECT {COLUMNS} FROM tender_questions \
             WHERE tender_id = $1 \
             ORDER BY position ASC, id ASC"
        ))
        .bind(tender_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        decode_all(reordered).map(Some)
    }
}

async fn set_position(conn: &mut PgConnection, id: DbId, position: i32) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE tender_questions SET position = $2 WHERE id = $1")
        .bind(id)
        .bind(position)
        .execute(conn)
        .await?;
    Ok(())
}

fn decode(row: QuestionRow) -> Result<Question, sqlx::Error> {
    Question::try_from(row).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

fn decode_all(rows: Vec<QuestionRow>) -> Result<Vec<Question>, sqlx::Error> {
    rows.into_iter().map(decode).collect()
}
