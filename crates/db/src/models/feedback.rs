//! Contact-form feedback model and DTOs.

use rada_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `feedback` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feedback {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub message_type: String,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub admin_response: Option<String>,
    pub submitter_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for submitting a contact message.
#[derive(Debug, Deserialize)]
pub struct CreateFeedback {
    pub name: String,
    pub email: String,
    pub message_type: Option<String>,
    pub subject: String,
    pub message: String,
}

/// DTO for the admin triage update.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateFeedback {
    pub status: Option<String>,
    pub admin_response: Option<String>,
}

/// Query parameters for listing feedback.
#[derive(Debug, Default, Deserialize)]
pub struct FeedbackListParams {
    pub status: Option<String>,
}
