//! Repository for the `tenders` table.

use rada_core::tender::escape_like;
use rada_core::types::DbId;
use sqlx::PgPool;

use crate::models::tender::{CreateTender, Tender, UpdateTender};

/// Column list for `tenders` queries.
const COLUMNS: &str = "id, title, content, is_active, has_form, created_at, updated_at";

/// Provides CRUD operations for tenders.
pub struct TenderRepo;

impl TenderRepo {
    /// Insert a new tender, returning the created row.
    ///
    /// `is_active` defaults to `true`, `has_form` to `false`.
    pub async fn create(pool: &PgPool, input: &CreateTender) -> Result<Tender, sqlx::Error> {
        let query = format!(
            "INSERT INTO tenders (title, content, is_active, has_form) \
             VALUES ($1, $2, COALESCE($3, true), COALESCE($4, false)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tender>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.is_active)
            .bind(input.has_form)
            .fetch_one(pool)
            .await
    }

    /// Find a tender by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tender>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tenders WHERE id = $1");
        sqlx::query_as::<_, Tender>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a tender visible to the public (active only).
    pub async fn find_active(pool: &PgPool, id: DbId) -> Result<Option<Tender>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tenders WHERE id = $1 AND is_active = true");
        sqlx::query_as::<_, Tender>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active tenders, newest first.
    ///
    /// `search` is matched case-insensitively and literally against title
    /// and content.
    pub async fn list_active(
        pool: &PgPool,
        search: Option<&str>,
    ) -> Result<Vec<Tender>, sqlx::Error> {
        let pattern = search.map(|term| format!("%{}%", escape_like(term)));
        let query = format!(
            "SELECT {COLUMNS} FROM tenders \
             WHERE is_active = true \
               AND ($1::TEXT IS NULL OR title ILIKE $1 OR content ILIKE $1) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Tender>(&query)
            .bind(pattern)
            .fetch_all(pool)
            .await
    }

    /// List every tender for the admin console.
    ///
    /// With `has_form = Some(true)` only form-enabled tenders are returned,
    /// ordered by title (the picker used by the question editor). Otherwise
    /// newest first.
    pub async fn list_all(
        pool: &PgPool,
        has_form: Option<bool>,
    ) -> Result<Vec<Tender>, sqlx::Error> {
        let order = if has_form == Some(true) {
            "title ASC, id ASC"
        } else {
            "created_at DESC, id DESC"
        };
        let query = format!(
            "SELECT {COLUMNS} FROM tenders \
             WHERE ($1::BOOLEAN IS NULL OR has_form = $1) \
             ORDER BY {order}"
        );
        sqlx::query_as::<_, Tender>(&query)
            .bind(has_form)
            .fetch_all(pool)
            .await
    }

    /// Update a tender. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTender,
    ) -> Result<Option<Tender>, sqlx::Error> {
        let query = format!(
            "UPDATE tenders SET \
                title = COALESCE($2, title), \
                content = COALESCE($3, content), \
                is_active = COALESCE($4, is_active), \
                has_form = COALESCE($5, has_form) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tender>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.is_active)
            .bind(input.has_form)
            .fetch_optional(pool)
            .await
    }

    /// Flip `is_active`, returning the updated row.
    pub async fn toggle_active(pool: &PgPool, id: DbId) -> Result<Option<Tender>, sqlx::Error> {
        let query = format!(
            "UPDATE tenders SET is_active = NOT is_active WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tender>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a tender. Its questions cascade; submitted responses remain.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tenders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
