//! Form question row, DTOs and conversion into the domain type.

use rada_core::error::CoreError;
use rada_core::question::{Question, QuestionKind, QuestionType};
use rada_core::reorder::Direction;
use rada_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;

/// A row from the `tender_questions` table.
///
/// Not serialized directly; handlers return [`Question`], whose kind
/// carries its choices.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionRow {
    pub id: DbId,
    pub tender_id: DbId,
    pub text: String,
    pub question_type: String,
    pub choices: Option<Vec<String>>,
    pub required: bool,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<QuestionRow> for Question {
    type Error = CoreError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        let ty = QuestionType::parse(&row.question_type)?;
        Ok(Question {
            id: row.id,
            tender_id: row.tender_id,
            text: row.text,
            kind: QuestionKind::from_parts(ty, row.choices),
            required: row.required,
            position: row.position,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// DTO for creating a question.
#[derive(Debug, Deserialize)]
pub struct CreateQuestion {
    pub text: String,
    pub question_type: String,
    pub choices: Option<Vec<String>>,
    pub required: Option<bool>,
    /// Defaults to the current number of questions (append).
    pub position: Option<i32>,
}

/// DTO for updating a question. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateQuestion {
    pub text: Option<String>,
    pub question_type: Option<String>,
    pub choices: Option<Vec<String>>,
    pub required: Option<bool>,
    pub position: Option<i32>,
}

/// Validated column changes handed to the repository.
///
/// `kind`, when present, replaces both `question_type` and `choices`.
#[derive(Debug, Default)]
pub struct QuestionChanges {
    pub text: Option<String>,
    pub kind: Option<QuestionKind>,
    pub required: Option<bool>,
    pub position: Option<i32>,
}

/// Request body for moving a question one step.
#[derive(Debug, Deserialize)]
pub struct MoveQuestion {
    pub direction: Direction,
}
