//! Form session state machine and field rendering for tender applications.
//!
//! ```text
//! Loading --ready()--> Ready --begin_submit()--> Submitting --submit_succeeded()--> Submitted
//!                        ^                           |
//!                        +----submit_failed()--------+
//! ```
//!
//! The schema is captured once when the session becomes ready and is never
//! refreshed; later schema edits are not observed by an open session.

use serde::Serialize;

use crate::answer::{check_answer_shape, Answer, Answers};
use crate::error::CoreError;
use crate::question::{sort_questions, Question, QuestionKind};
use crate::types::DbId;

/// Lifecycle phase of a [`FormSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Loading,
    Ready,
    Submitting,
    Submitted,
}

/// The payload handed to the store when a session starts submitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub tender_id: DbId,
    pub submitter_id: Option<DbId>,
    pub answers: Answers,
}

/// One applicant's in-progress application for one tender.
#[derive(Debug, Clone)]
pub struct FormSession {
    tender_id: DbId,
    schema: Vec<Question>,
    answers: Answers,
    phase: Phase,
    last_error: Option<String>,
}

impl FormSession {
    /// Start a session in the `Loading` phase.
    pub fn new(tender_id: DbId) -> Self {
        Self {
            tender_id,
            schema: Vec::new(),
            answers: Answers::new(),
            phase: Phase::Loading,
            last_error: None,
        }
    }

    /// Capture the schema and move to `Ready`.
    pub fn ready(&mut self, mut schema: Vec<Question>) -> Result<(), CoreError> {
        self.expect_phase(Phase::Loading, "load the form")?;
        sort_questions(&mut schema);
        self.schema = schema;
        self.phase = Phase::Ready;
        Ok(())
    }

    pub fn tender_id(&self) -> DbId {
        self.tender_id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn schema(&self) -> &[Question] {
        &self.schema
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    /// The error from the most recent failed submission, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Store an answer after checking it against the question's kind.
    pub fn set_answer(&mut self, question_id: DbId, answer: Answer) -> Result<(), CoreError> {
        self.expect_phase(Phase::Ready, "edit answers")?;
        let question = self.question(question_id)?;
        check_answer_shape(question, &answer)?;
        self.answers.insert(question_id, answer);
        Ok(())
    }

    /// Set the value of a text question.
    pub fn set_text(&mut self, question_id: DbId, value: impl Into<String>) -> Result<(), CoreError> {
        self.set_answer(question_id, Answer::Text(value.into()))
    }

    /// Pick the single option of a dropdown or radio question.
    pub fn select_choice(&mut self, question_id: DbId, choice: &str) -> Result<(), CoreError> {
        let question = self.question(question_id)?;
        if !matches!(
            question.kind,
            QuestionKind::SingleChoiceList { .. } | QuestionKind::SingleChoiceExclusive { .. }
        ) {
            return Err(CoreError::Validation(format!(
                "Question {question_id} is not a single-choice question"
            )));
        }
        self.set_answer(question_id, Answer::Text(choice.to_string()))
    }

    /// Toggle one option of a checkbox question. Selecting appends, so the
    /// stored list keeps the order options were ticked in.
    pub fn toggle_choice(&mut self, question_id: DbId, choice: &str) -> Result<(), CoreError> {
        let question = self.question(question_id)?;
        if !matches!(question.kind, QuestionKind::MultiChoice { .. }) {
            return Err(CoreError::Validation(format!(
                "Question {question_id} is not a multi-choice question"
            )));
        }

        let mut selected = match self.answers.get(&question_id) {
            Some(Answer::Choices(list)) => list.clone(),
            _ => Vec::new(),
        };
        match selected.iter().position(|c| c == choice) {
            Some(idx) => {
                selected.remove(idx);
            }
            None => selected.push(choice.to_string()),
        }
        self.set_answer(question_id, Answer::Choices(selected))
    }

    /// Ids of required questions without a non-empty answer, in schema order.
    pub fn violations(&self) -> Vec<DbId> {
        missing_required(&self.schema, &self.answers)
    }

    /// Validate and move to `Submitting`. On violations the session stays
    /// `Ready` and every violated question is reported together.
    pub fn begin_submit(&mut self, submitter_id: Option<DbId>) -> Result<Submission, CoreError> {
        self.expect_phase(Phase::Ready, "submit")?;
        let missing = self.violations();
        if !missing.is_empty() {
            return Err(CoreError::MissingAnswers {
                question_ids: missing,
            });
        }
        self.phase = Phase::Submitting;
        self.last_error = None;
        Ok(Submission {
            tender_id: self.tender_id,
            submitter_id,
            answers: self.answers.clone(),
        })
    }

    /// The store accepted the submission. Terminal.
    pub fn submit_succeeded(&mut self) -> Result<(), CoreError> {
        self.expect_phase(Phase::Submitting, "complete a submission")?;
        self.phase = Phase::Submitted;
        Ok(())
    }

    /// The store rejected the submission. Back to `Ready` with all answers kept.
    pub fn submit_failed(&mut self, error: impl Into<String>) -> Result<(), CoreError> {
        self.expect_phase(Phase::Submitting, "fail a submission")?;
        self.phase = Phase::Ready;
        self.last_error = Some(error.into());
        Ok(())
    }

    fn question(&self, question_id: DbId) -> Result<&Question, CoreError> {
        self.schema
            .iter()
            .find(|q| q.id == question_id)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Question {question_id} is not part of this form"
                ))
            })
    }

    fn expect_phase(&self, expected: Phase, action: &str) -> Result<(), CoreError> {
        if self.phase != expected {
            return Err(CoreError::Conflict(format!(
                "Cannot {action} while the form is {:?}",
                self.phase
            )));
        }
        Ok(())
    }
}

/// Required questions in `schema` that have no non-empty answer.
pub fn missing_required(schema: &[Question], answers: &Answers) -> Vec<DbId> {
    schema
        .iter()
        .filter(|q| q.required)
        .filter(|q| answers.get(&q.id).map_or(true, Answer::is_empty))
        .map(|q| q.id)
        .collect()
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// The input affordance a question renders as. Exactly one per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
    SingleLine,
    MultiLine,
    Dropdown,
    RadioGroup,
    CheckboxGroup,
}

pub fn widget_for(kind: &QuestionKind) -> Widget {
    match kind {
        QuestionKind::ShortText => Widget::SingleLine,
        QuestionKind::LongText => Widget::MultiLine,
        QuestionKind::SingleChoiceList { .. } => Widget::Dropdown,
        QuestionKind::SingleChoiceExclusive { .. } => Widget::RadioGroup,
        QuestionKind::MultiChoice { .. } => Widget::CheckboxGroup,
    }
}

/// A question ready for display: its widget, options and current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedField {
    pub question_id: DbId,
    pub label: String,
    pub widget: Widget,
    pub options: Vec<String>,
    pub required: bool,
    pub value: Option<Answer>,
}

/// Render `schema` in display order, filling in any values from `answers`.
pub fn render(schema: &[Question], answers: &Answers) -> Vec<RenderedField> {
    let mut ordered: Vec<&Question> = schema.iter().collect();
    ordered.sort_by_key(|q| (q.position, q.id));
    ordered
        .into_iter()
        .map(|q| RenderedField {
            question_id: q.id,
            label: q.text.clone(),
            widget: widget_for(&q.kind),
            options: q.kind.choices().to_vec(),
            required: q.required,
            value: answers.get(&q.id).cloned(),
        })
        .collect()
}
