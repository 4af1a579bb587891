//! Administrative view of submitted applications.
//!
//! Submitted data must never disappear from this view: an answer whose
//! question has since been deleted still gets a row, under a placeholder.

use serde::Serialize;

use crate::answer::{Answer, Answers};
use crate::question::Question;
use crate::types::{DbId, Timestamp};

/// Label shown for answers whose question no longer exists.
pub const MISSING_QUESTION_LABEL: &str = "question no longer available";

/// One answer rendered against the current schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerRow {
    pub question_id: DbId,
    pub question_text: String,
    pub answer: Answer,
    pub display: String,
    /// `false` when the question could not be found in the current schema.
    pub resolved: bool,
}

/// One submitted record ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseView {
    pub id: DbId,
    pub tender_id: DbId,
    pub submitter_id: Option<DbId>,
    pub submitted_at: Timestamp,
    pub rows: Vec<AnswerRow>,
}

/// Render `answers` against `schema`.
///
/// Rows for known questions come first, in schema display order; orphaned
/// answers follow in question-id order.
pub fn answer_rows(schema: &[Question], answers: &Answers) -> Vec<AnswerRow> {
    let mut ordered: Vec<&Question> = schema.iter().collect();
    ordered.sort_by_key(|q| (q.position, q.id));

    let mut rows: Vec<AnswerRow> = ordered
        .iter()
        .filter_map(|q| {
            answers.get(&q.id).map(|answer| AnswerRow {
                question_id: q.id,
                question_text: q.text.clone(),
                answer: answer.clone(),
                display: answer.display(),
                resolved: true,
            })
        })
        .collect();

    rows.extend(
        answers
            .iter()
            .filter(|(id, _)| !schema.iter().any(|q| q.id == **id))
            .map(|(id, answer)| AnswerRow {
                question_id: *id,
                question_text: MISSING_QUESTION_LABEL.to_string(),
                answer: answer.clone(),
                display: answer.display(),
                resolved: false,
            }),
    );
    rows
}

/// Build the view of one record.
pub fn build_view(
    schema: &[Question],
    id: DbId,
    tender_id: DbId,
    submitter_id: Option<DbId>,
    submitted_at: Timestamp,
    answers: &Answers,
) -> ResponseView {
    ResponseView {
        id,
        tender_id,
        submitter_id,
        submitted_at,
        rows: answer_rows(schema, answers),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::QuestionKind;
    use chrono::Utc;

    fn question(id: DbId, position: i32, text: &str) -> Question {
        Question {
            id,
            tender_id: 1,
            text: text.to_string(),
            kind: QuestionKind::ShortText,
            required: false,
            position,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn scenario_answers() -> Answers {
        let mut answers = Answers::new();
        answers.insert(1, Answer::Text("hello".into()));
        answers.insert(2, Answer::Choices(vec!["A".into()]));
        answers
    }

    #[test]
    fn deleted_question_renders_placeholder() {
        // q2 was deleted after submission.
        let schema = vec![question(1, 0, "Company name")];
        let rows = answer_rows(&schema, &scenario_answers());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].question_text, "Company name");
        assert_eq!(rows[0].display, "hello");
        assert!(rows[0].resolved);

        assert_eq!(rows[1].question_id, 2);
        assert_eq!(rows[1].question_text, MISSING_QUESTION_LABEL);
        assert_eq!(rows[1].answer, Answer::Choices(vec!["A".into()]));
        assert!(!rows[1].resolved);
    }

    #[test]
    fn rows_follow_current_schema_order() {
        let schema = vec![question(1, 5, "Second"), question(2, 1, "First")];
        let rows = answer_rows(&schema, &scenario_answers());
        let texts: Vec<&str> = rows.iter().map(|r| r.question_text.as_str()).collect();
        assert_eq!(texts, vec!["First", "Second"]);
    }

    #[test]
    fn unanswered_questions_produce_no_rows() {
        let schema = vec![question(1, 0, "A"), question(3, 1, "B")];
        let mut answers = Answers::new();
        answers.insert(3, Answer::Text("only".into()));
        let rows = answer_rows(&schema, &answers);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].question_id, 3);
    }

    #[test]
    fn empty_schema_keeps_every_answer() {
        let rows = answer_rows(&[], &scenario_answers());
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| !r.resolved));
    }

    #[test]
    fn build_view_copies_record_metadata() {
        let now = Utc::now();
        let view = build_view(&[], 10, 1, None, now, &Answers::new());
        assert_eq!(view.id, 10);
        assert_eq!(view.submitter_id, None);
        assert_eq!(view.submitted_at, now);
        assert!(view.rows.is_empty());
    }
}
