//! Repository for the `tender_responses` table.
//!
//! Records are append-only; no update or delete is offered.

use rada_core::form::Submission;
use rada_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::response::ResponseRecord;

/// Column list for `tender_responses` queries.
const COLUMNS: &str = "id, tender_id, submitter_id, answers, submitted_at";

/// Provides insert and listing for submitted applications.
pub struct ResponseRepo;

impl ResponseRepo {
    /// Persist a submission. `submitted_at` is set by the database.
    ///
    /// A second submission by the same identity for the same tender fails
    /// with a unique violation on `uq_tender_responses_tender_submitter`.
    pub async fn create(
        pool: &PgPool,
        submission: &Submission,
    ) -> Result<ResponseRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO tender_responses (tender_id, submitter_id, answers) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ResponseRecord>(&query)
            .bind(submission.tender_id)
            .bind(submission.submitter_id)
            .bind(Json(&submission.answers))
            .fetch_one(pool)
            .await
    }

    /// List a tender's records, newest first.
    pub async fn list_by_tender(
        pool: &PgPool,
        tender_id: DbId,
    ) -> Result<Vec<ResponseRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tender_responses \
             WHERE tender_id = $1 \
             ORDER BY submitted_at DESC, id DESC"
        );
        sqlx::query_as::<_, ResponseRecord>(&query)
            .bind(tender_id)
            .fetch_all(pool)
            .await
    }

    /// Count records for a tender.
    pub async fn count_by_tender(pool: &PgPool, tender_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tender_responses WHERE tender_id = $1")
            .bind(tender_id)
            .fetch_one(pool)
            .await
    }
}
