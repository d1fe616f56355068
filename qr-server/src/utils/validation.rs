//! Input validation helpers
//!
//! Centralized length limits and validation functions for request payloads.

use crate::utils::AppError;

// ── Limits ──────────────────────────────────────────────────────────

/// Table codes ("1", "A12", "terrace-3")
pub const MAX_TABLE_CODE_LEN: usize = 32;

/// Search keyword
pub const MAX_QUERY_LEN: usize = 100;

/// Kitchen passcode
pub const MAX_PASSCODE_LEN: usize = 128;

/// Quantity accepted in one cart operation
pub const MAX_QTY: i64 = 99;

/// Largest party size offered on the landing view
pub const MAX_PARTY_SIZE: u32 = 20;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
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
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

pub fn validate_table_code(code: &str) -> Result<(), AppError> {
    validate_required_text(code, "table_code", MAX_TABLE_CODE_LEN)?;
    if code.chars().any(|c| c.is_whitespace() || c == '/') {
        return Err(AppError::validation(
            "table_code must not contain whitespace or '/'",
        ));
    }
    Ok(())
}

/// Quantity for add/sub: 1..=MAX_QTY
pub fn validate_step(qty: i64) -> Result<(), AppError> {
    if !(1..=MAX_QTY).contains(&qty) {
        return Err(AppError::validation(format!(
            "qty must be between 1 and {MAX_QTY}"
        )));
    }
    Ok(())
}

/// Quantity for set: 0 removes, negative is accepted and also removes
pub fn validate_set_qty(qty: i64) -> Result<(), AppError> {
    if qty > MAX_QTY {
        return Err(AppError::validation(format!("qty must not exceed {MAX_QTY}")));
    }
    Ok(())
}

pub fn validate_party_size(size: u32) -> Result<(), AppError> {
    if !(1..=MAX_PARTY_SIZE).contains(&size) {
        return Err(AppError::validation(format!(
            "party must be between 1 and {MAX_PARTY_SIZE}"
        )));
    }
    Ok(())
}
