//! Contact-form feedback: message types, workflow statuses and validation.

use validator::Validate;

use crate::error::CoreError;

pub const TYPE_QUESTION: &str = "question";
pub const TYPE_COMPLAINT: &str = "complaint";
pub const TYPE_SUGGESTION: &str = "suggestion";
pub const TYPE_MESSAGE: &str = "message";

/// All valid feedback message types.
pub const VALID_MESSAGE_TYPES: &[&str] =
    &[TYPE_QUESTION, TYPE_COMPLAINT, TYPE_SUGGESTION, TYPE_MESSAGE];

/// Message type used when the sender does not pick one.
pub const DEFAULT_MESSAGE_TYPE: &str = TYPE_QUESTION;

pub const STATUS_NEW: &str = "new";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_RESOLVED: &str = "resolved";
pub const STATUS_CLOSED: &str = "closed";

/// All valid feedback statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_NEW, STATUS_IN_PROGRESS, STATUS_RESOLVED, STATUS_CLOSED];

/// Field-level rules for an incoming contact message.
#[derive(Debug, Validate)]
pub struct FeedbackDraft {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 300))]
    pub subject: String,
    #[validate(length(min = 1, max = 10000))]
    pub message: String,
}

/// Validate a contact message before it is stored.
pub fn validate_draft(draft: &FeedbackDraft) -> Result<(), CoreError> {
    for (field, value) in [
        ("name", &draft.name),
        ("subject", &draft.subject),
        ("message", &draft.message),
    ] {
        if value.trim().is_empty() {
            return Err(CoreError::Validation(format!("{field} must not be empty")));
        }
    }
    draft
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))
}

/// Validate a message type against the known set.
pub fn validate_message_type(message_type: &str) -> Result<(), CoreError> {
    if !VALID_MESSAGE_TYPES.contains(&message_type) {
        return Err(CoreError::Validation(format!(
            "Invalid message type '{message_type}'. Valid types: {}",
            VALID_MESSAGE_TYPES.join(", ")
        )));
    }
    Ok(())
}

/// Validate a status against the known set.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if !VALID_STATUSES.contains(&status) {
        return Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Valid statuses: {}",
            VALID_STATUSES.join(", ")
        )));
    }
    Ok(())
}
