//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Club names, student names
pub const MAX_NAME_LEN: usize = 200;

/// Club descriptions (free text / HTML fragment)
pub const MAX_DESCRIPTION_LEN: usize = 10_000;

/// Student identifier (class/seat code)
pub const MAX_IDENTIFIER_LEN: usize = 32;

/// Phone numbers
pub const MAX_PHONE_LEN: usize = 32;

/// Site title and welcome message
pub const MAX_NOTE_LEN: usize = 500;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty"))
            .with_detail("field", field));
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Phone numbers: digits plus `+ - ( )` and spaces, at least 6 digits.
pub fn validate_phone(value: &str, field: &str) -> Result<(), AppError> {
    validate_required_text(value, field, MAX_PHONE_LEN)?;
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '));
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if !allowed || digits < 6 {
        return Err(AppError::validation(format!("{field} is not a valid phone number"))
            .with_detail("field", field));
    }
    Ok(())
}
