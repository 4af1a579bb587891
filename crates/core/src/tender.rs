//! Tender validation.

use crate::error::CoreError;

/// Maximum length of a tender title.
pub const MAX_TITLE_LEN: usize = 300;

/// Maximum length of a public search term.
pub const MAX_SEARCH_LEN: usize = 200;

/// Validate a tender title (non-blank, <= 300 chars).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate tender body content (non-blank).
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation("Content must not be empty".into()));
    }
    Ok(())
}

/// Normalize a search term: trimmed, `None` when blank.
pub fn normalize_search(term: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    if term.chars().count() > MAX_SEARCH_LEN {
        return Err(CoreError::Validation(format!(
            "Search term must be at most {MAX_SEARCH_LEN} characters"
        )));
    }
    Ok(Some(term.to_string()))
}

/// Escape `LIKE` wildcards so a search term matches literally.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
