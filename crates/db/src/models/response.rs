//! Submitted application record.

use rada_core::answer::Answers;
use rada_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `tender_responses` table. Append-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResponseRecord {
    pub id: DbId,
    pub tender_id: DbId,
    pub submitter_id: Option<DbId>,
    pub answers: Json<Answers>,
    pub submitted_at: Timestamp,
}
