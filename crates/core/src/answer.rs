//! Applicant answers and their shape rules.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::question::{Question, QuestionKind};
use crate::types::DbId;

/// One answer value. Text kinds and single-choice kinds answer with a
/// string; multi-choice answers with a list in selection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Choices(Vec<String>),
}

/// Answers keyed by question id. Serialized as a JSON object whose keys are
/// the question ids.
pub type Answers = BTreeMap<DbId, Answer>;

impl Answer {
    /// An empty string or an empty list counts as "not answered".
    pub fn is_empty(&self) -> bool {
        match self {
            Answer::Text(s) => s.is_empty(),
            Answer::Choices(list) => list.is_empty(),
        }
    }

    /// Human-readable form used by the response viewer.
    pub fn display(&self) -> String {
        match self {
            Answer::Text(s) => s.clone(),
            Answer::Choices(list) => list.join(", "),
        }
    }
}

/// Check that `answer` has the shape `question`'s kind expects and that any
/// chosen option exists in the question's option set.
pub fn check_answer_shape(question: &Question, answer: &Answer) -> Result<(), CoreError> {
    match (&question.kind, answer) {
        (QuestionKind::ShortText | QuestionKind::LongText, Answer::Text(_)) => Ok(()),
        (
            QuestionKind::SingleChoiceList { choices } | QuestionKind::SingleChoiceExclusive { choices },
            Answer::Text(value),
        ) => {
            if value.is_empty() || choices.contains(value) {
                Ok(())
            } else {
                Err(unknown_choice(question.id, value))
            }
        }
        (QuestionKind::MultiChoice { choices }, Answer::Choices(values)) => {
            if let Some(bad) = values.iter().find(|v| !choices.contains(v)) {
                return Err(unknown_choice(question.id, bad));
            }
            // A toggled selection holds each option at most once.
            let mut seen = BTreeSet::new();
            match values.iter().find(|v| !seen.insert(v.as_str())) {
                Some(repeated) => Err(CoreError::Validation(format!(
                    "'{repeated}' is selected more than once for question {}",
                    question.id
                ))),
                None => Ok(()),
            }
        }
        (kind, _) => Err(CoreError::Validation(format!(
            "Answer for question {} has the wrong shape for type '{}'",
            question.id,
            kind.question_type().as_str()
        ))),
    }
}

fn unknown_choice(question_id: DbId, value: &str) -> CoreError {
    CoreError::Validation(format!(
        "'{value}' is not an option of question {question_id}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;

    fn question(id: DbId, kind: QuestionKind) -> Question {
        Question {
            id,
            tender_id: 1,
            text: format!("Question {id}"),
            kind,
            required: false,
            position: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn empty_values_count_as_unanswered() {
        assert!(Answer::Text(String::new()).is_empty());
        assert!(Answer::Choices(vec![]).is_empty());
        assert!(!Answer::Text(" ".into()).is_empty());
    }

    #[test]
    fn display_joins_lists() {
        let answer = Answer::Choices(vec!["A".into(), "B".into()]);
        assert_eq!(answer.display(), "A, B");
    }

    #[test]
    fn answers_deserialize_from_json_object() {
        let answers: Answers =
            serde_json::from_value(serde_json::json!({"1": "hello", "2": ["A"]})).unwrap();
        assert_eq!(answers[&1], Answer::Text("hello".into()));
        assert_eq!(answers[&2], Answer::Choices(vec!["A".into()]));
    }

    #[test]
    fn list_answer_for_text_question_is_rejected() {
        let q = question(1, QuestionKind::ShortText);
        let result = check_answer_shape(&q, &Answer::Choices(vec!["A".into()]));
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn choice_outside_option_set_is_rejected() {
        let q = question(
            2,
            QuestionKind::MultiChoice {
                choices: vec!["A".into(), "B".into()],
            },
        );
        assert!(check_answer_shape(&q, &Answer::Choices(vec!["A".into()])).is_ok());
        assert!(check_answer_shape(&q, &Answer::Choices(vec!["C".into()])).is_err());
    }

    #[test]
    fn repeated_multi_choice_selection_is_rejected() {
        let q = question(
            2,
            QuestionKind::MultiChoice {
                choices: vec!["A".into(), "B".into()],
            },
        );
        let result = check_answer_shape(&q, &Answer::Choices(vec!["A".into(), "A".into()]));
        assert_matches!(result, Err(CoreError::Validation(_)));
        assert!(check_answer_shape(&q, &Answer::Choices(vec!["B".into(), "A".into()])).is_ok());
    }

    #[test]
    fn single_choice_accepts_known_option() {
        let q = question(
            3,
            QuestionKind::SingleChoiceExclusive {
                choices: vec!["Yes".into(), "No".into()],
            },
        );
        assert!(check_answer_shape(&q, &Answer::Text("No".into())).is_ok());
        assert!(check_answer_shape(&q, &Answer::Text("Maybe".into())).is_err());
        assert!(check_answer_shape(&q, &Answer::Choices(vec![])).is_err());
    }
}
