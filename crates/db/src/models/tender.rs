//! Tender entity model and DTOs.

use rada_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tenders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tender {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub is_active: bool,
    pub has_form: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new tender.
#[derive(Debug, Deserialize)]
pub struct CreateTender {
    pub title: String,
    pub content: String,
    pub is_active: Option<bool>,
    pub has_form: Option<bool>,
}

/// DTO for updating an existing tender. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTender {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_active: Option<bool>,
    pub has_form: Option<bool>,
}

/// Query parameters for the public tender list.
#[derive(Debug, Default, Deserialize)]
pub struct TenderSearchParams {
    pub q: Option<String>,
}

/// Query parameters for the admin tender list.
#[derive(Debug, Default, Deserialize)]
pub struct TenderListParams {
    pub has_form: Option<bool>,
}
