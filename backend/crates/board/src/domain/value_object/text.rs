//! Text Fields
//!
//! Validation for user-supplied post and comment text.

use kernel::error::app_error::{AppError, AppResult};

/// Trim and require a non-empty value
pub fn required_text(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Trim, require non-empty, and cap the length in characters
pub fn bounded_text(field: &str, value: &str, max_chars: usize) -> AppResult<String> {
    let text = required_text(field, value)?;
    if text.chars().count() > max_chars {
        return Err(AppError::invalid_input(format!(
            "{field} must be at most {max_chars} characters"
        )));
    }
    Ok(text)
}

/// Trim each tag, drop empties and duplicates (first occurrence wins)
pub fn normalize_tags(tags: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Blank optional strings collapse to `None`
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
