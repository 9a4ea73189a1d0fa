//! Input validation for long URLs and custom short codes.
//!
//! Both validators trim surrounding whitespace and return the trimmed value,
//! which is what callers should persist.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;
use url::Url;

/// Schemes accepted for long URLs.
pub const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp"];

/// Shortest custom code accepted.
pub const MIN_CODE_LENGTH: usize = 3;

/// Longest custom code accepted.
pub const MAX_CODE_LENGTH: usize = 8;

/// Codes that would shadow top-level routes.
pub const RESERVED_CODES: &[&str] = &["api", "healthz"];

static SHORT_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{3,8}$").expect("valid short code regex"));

/// Validates a user-supplied long URL.
///
/// # Rules
///
/// - Must not be empty after trimming
/// - Must not contain whitespace, control characters, `<` or `>`
/// - Must parse as an absolute URL with an explicit scheme
/// - Scheme must be one of [`ALLOWED_SCHEMES`]
/// - Must contain a non-empty host
///
/// # Errors
///
/// Returns [`AppError::InvalidUrl`] if any rule is violated.
pub fn validate_url(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(AppError::invalid_url("URL is required", json!({})));
    }

    // The parser drops tabs and newlines silently, but the stored string must
    // survive as a `Location` header.
    if let Some(c) = trimmed
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || matches!(c, '<' | '>'))
    {
        return Err(AppError::invalid_url(
            "URL must not contain whitespace or control characters",
            json!({ "character": format!("{}", c.escape_default()) }),
        ));
    }

    let url = Url::parse(trimmed).map_err(|e| {
        AppError::invalid_url("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;

    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return Err(AppError::invalid_url(
            "Unsupported URL scheme",
            json!({ "scheme": url.scheme(), "allowed": ALLOWED_SCHEMES }),
        ));
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(AppError::invalid_url(
            "URL must include a host",
            json!({ "url": trimmed }),
        ));
    }

    Ok(trimmed.to_string())
}

/// Validates a user-supplied custom short code.
///
/// # Rules
///
/// - Length 3-8 characters after trimming
/// - Only ASCII letters and digits (`[A-Za-z0-9]`)
/// - Cannot be one of [`RESERVED_CODES`]
///
/// # Errors
///
/// Returns [`AppError::InvalidCode`] if any rule is violated.
pub fn validate_short_code(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    let length = trimmed.chars().count();

    if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&length) {
        return Err(AppError::invalid_code(
            "Short code must be 3-8 characters",
            json!({ "provided_length": length }),
        ));
    }

    if !SHORT_CODE_REGEX.is_match(trimmed) {
        return Err(AppError::invalid_code(
            "Short code must contain only letters and numbers (A-Z, a-z, 0-9)",
            json!({ "code": trimmed }),
        ));
    }

    if RESERVED_CODES.contains(&trimmed) {
        return Err(AppError::invalid_code(
            "This code is reserved",
            json!({ "code": trimmed }),
        ));
    }

    Ok(trimmed.to_string())
}
