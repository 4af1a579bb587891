//! Tender application form questions.
//!
//! A question's kind is a closed enum: the enumerated-choice variants always
//! carry their option list and the text variants carry none, so a "text
//! question with choices" cannot be represented.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Maximum length of a question prompt.
pub const MAX_QUESTION_TEXT_LEN: usize = 2000;

/// Maximum length of a single choice label.
pub const MAX_CHOICE_LEN: usize = 500;

pub const TYPE_SHORT_TEXT: &str = "short_text";
pub const TYPE_LONG_TEXT: &str = "long_text";
pub const TYPE_SINGLE_CHOICE_LIST: &str = "single_choice_list";
pub const TYPE_SINGLE_CHOICE_EXCLUSIVE: &str = "single_choice_exclusive";
pub const TYPE_MULTI_CHOICE: &str = "multi_choice";

/// All valid question type labels. Must match the `CHECK` constraint on
/// `tender_questions.question_type`.
pub const VALID_QUESTION_TYPES: &[&str] = &[
    TYPE_SHORT_TEXT,
    TYPE_LONG_TEXT,
    TYPE_SINGLE_CHOICE_LIST,
    TYPE_SINGLE_CHOICE_EXCLUSIVE,
    TYPE_MULTI_CHOICE,
];

/// The bare type tag of a question, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    ShortText,
    LongText,
    SingleChoiceList,
    SingleChoiceExclusive,
    MultiChoice,
}

impl QuestionType {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::ShortText => TYPE_SHORT_TEXT,
            QuestionType::LongText => TYPE_LONG_TEXT,
            QuestionType::SingleChoiceList => TYPE_SINGLE_CHOICE_LIST,
            QuestionType::SingleChoiceExclusive => TYPE_SINGLE_CHOICE_EXCLUSIVE,
            QuestionType::MultiChoice => TYPE_MULTI_CHOICE,
        }
    }

    pub fn parse(label: &str) -> Result<Self, CoreError> {
        match label {
            TYPE_SHORT_TEXT => Ok(QuestionType::ShortText),
            TYPE_LONG_TEXT => Ok(QuestionType::LongText),
            TYPE_SINGLE_CHOICE_LIST => Ok(QuestionType::SingleChoiceList),
            TYPE_SINGLE_CHOICE_EXCLUSIVE => Ok(QuestionType::SingleChoiceExclusive),
            TYPE_MULTI_CHOICE => Ok(QuestionType::MultiChoice),
            other => Err(CoreError::Validation(format!(
                "Invalid question type '{other}'. Valid types: {}",
                VALID_QUESTION_TYPES.join(", ")
            ))),
        }
    }

    /// Whether questions of this type carry an option list.
    pub fn is_enumerated(self) -> bool {
        matches!(
            self,
            QuestionType::SingleChoiceList
                | QuestionType::SingleChoiceExclusive
                | QuestionType::MultiChoice
        )
    }
}

/// A question's kind together with its kind-specific payload.
///
/// Serializes flat as `{"question_type": "...", "choices": [...]}` with
/// `choices` present only for enumerated kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "question_type", rename_all = "snake_case")]
pub enum QuestionKind {
    ShortText,
    LongText,
    SingleChoiceList { choices: Vec<String> },
    SingleChoiceExclusive { choices: Vec<String> },
    MultiChoice { choices: Vec<String> },
}

impl QuestionKind {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionKind::ShortText => QuestionType::ShortText,
            QuestionKind::LongText => QuestionType::LongText,
            QuestionKind::SingleChoiceList { .. } => QuestionType::SingleChoiceList,
            QuestionKind::SingleChoiceExclusive { .. } => QuestionType::SingleChoiceExclusive,
            QuestionKind::MultiChoice { .. } => QuestionType::MultiChoice,
        }
    }

    /// The option list; empty for text kinds.
    pub fn choices(&self) -> &[String] {
        match self {
            QuestionKind::ShortText | QuestionKind::LongText => &[],
            QuestionKind::SingleChoiceList { choices }
            | QuestionKind::SingleChoiceExclusive { choices }
            | QuestionKind::MultiChoice { choices } => choices,
        }
    }

    /// Assemble a kind from its stored columns. Choices stored against a
    /// text type are dropped.
    pub fn from_parts(ty: QuestionType, choices: Option<Vec<String>>) -> Self {
        let choices = choices.unwrap_or_default();
        match ty {
            QuestionType::ShortText => QuestionKind::ShortText,
            QuestionType::LongText => QuestionKind::LongText,
            QuestionType::SingleChoiceList => QuestionKind::SingleChoiceList { choices },
            QuestionType::SingleChoiceExclusive => QuestionKind::SingleChoiceExclusive { choices },
            QuestionType::MultiChoice => QuestionKind::MultiChoice { choices },
        }
    }

    /// Split into storable columns: `(question_type, choices)`.
    pub fn to_parts(&self) -> (&'static str, Option<Vec<String>>) {
        let ty = self.question_type();
        let choices = ty.is_enumerated().then(|| self.choices().to_vec());
        (ty.as_str(), choices)
    }
}

/// One field of a tender's application form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: DbId,
    pub tender_id: DbId,
    pub text: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
    pub required: bool,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Sort questions into display order: position ascending, id as tie-break
/// so the order is stable even if two positions ever collide.
pub fn sort_questions(questions: &mut [Question]) {
    questions.sort_by_key(|q| (q.position, q.id));
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a question prompt (non-blank, bounded length).
pub fn validate_question_text(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation(
            "Question text must not be empty".into(),
        ));
    }
    if text.chars().count() > MAX_QUESTION_TEXT_LEN {
        return Err(CoreError::Validation(format!(
            "Question text must be at most {MAX_QUESTION_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate an explicit display position.
pub fn validate_position(position: i32) -> Result<(), CoreError> {
    if position < 0 {
        return Err(CoreError::Validation(
            "Position must be zero or greater".into(),
        ));
    }
    Ok(())
}

/// Drop blank entries from a supplied choice list.
///
/// An empty list is accepted as "no options yet". A non-empty list that is
/// blank after filtering is a malformed choice set.
pub fn normalize_choices(choices: Vec<String>) -> Result<Vec<String>, CoreError> {
    if choices.is_empty() {
        return Ok(choices);
    }
    let kept: Vec<String> = choices
        .into_iter()
        .filter(|c| !c.trim().is_empty())
        .collect();
    if kept.is_empty() {
        return Err(CoreError::Validation(
            "Choices must contain at least one non-blank entry".into(),
        ));
    }
    if let Some(long) = kept.iter().find(|c| c.chars().count() > MAX_CHOICE_LEN) {
        return Err(CoreError::Validation(format!(
            "Choice '{}...' exceeds {MAX_CHOICE_LEN} characters",
            long.chars().take(20).collect::<String>()
        )));
    }
    Ok(kept)
}

/// Build the kind for a new question from its type label and supplied choices.
pub fn build_kind(
    question_type: &str,
    choices: Option<Vec<String>>,
) -> Result<QuestionKind, CoreError> {
    let ty = QuestionType::parse(question_type)?;
    if !ty.is_enumerated() {
        return Ok(QuestionKind::from_parts(ty, None));
    }
    let choices = choices.map(normalize_choices).transpose()?;
    Ok(QuestionKind::from_parts(ty, choices))
}

/// Apply a partial type/choices change to an existing kind.
///
/// - Moving to a text type clears choices.
/// - Moving between enumerated types without supplying choices keeps them.
/// - Moving from a text type to an enumerated type without choices yields
///   an empty option set; it is stored as-is, not corrected.
pub fn patch_kind(
    current: &QuestionKind,
    question_type: Option<&str>,
    choices: Option<Vec<String>>,
) -> Result<QuestionKind, CoreError> {
    let ty = match question_type {
        Some(label) => QuestionType::parse(label)?,
        None => current.question_type(),
    };
    if !ty.is_enumerated() {
        return Ok(QuestionKind::from_parts(ty, None));
    }
    let choices = match choices {
        Some(supplied) => normalize_choices(supplied)?,
        None => current.choices().to_vec(),
    };
    Ok(QuestionKind::from_parts(ty, Some(choices)))
}
