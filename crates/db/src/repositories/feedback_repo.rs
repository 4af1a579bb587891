//! Repository for the `feedback` table.

use rada_core::types::DbId;
use sqlx::PgPool;

use crate::models::feedback::{CreateFeedback, Feedback, UpdateFeedback};

/// Column list for `feedback` queries.
const COLUMNS: &str = "id, name, email, message_type, subject, message, status, \
    admin_response, submitter_id, created_at, updated_at";

/// Provides CRUD operations for contact-form feedback.
pub struct FeedbackRepo;

impl FeedbackRepo {
    /// Store a validated contact message with status `new`.
    pub async fn create(
        pool: &PgPool,
        submitter_id: Option<DbId>,
        message_type: &str,
        input: &CreateFeedback,
    ) -> Result<Feedback, sqlx::Error> {
        let query = format!(
            "INSERT INTO feedback (name, email, message_type, subject, message, submitter_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(input.name.trim())
            .bind(input.email.trim())
            .bind(message_type)
            .bind(input.subject.trim())
            .bind(input.message.trim())
            .bind(submitter_id)
            .fetch_one(pool)
            .await
    }

    /// Find a feedback entry by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Feedback>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM feedback WHERE id = $1");
        sqlx::query_as::<_, Feedback>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List feedback newest first, optionally filtered by status.
    pub async fn list(pool: &PgPool, status: Option<&str>) -> Result<Vec<Feedback>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM feedback \
             WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Update status and/or the admin reply. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFeedback,
    ) -> Result<Option<Feedback>, sqlx::Error> {
        let query = format!(
            "UPDATE feedback SET \
                status = COALESCE($2, status), \
                admin_response = COALESCE($3, admin_response) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(&input.admin_response)
            .fetch_optional(pool)
            .await
    }
}
