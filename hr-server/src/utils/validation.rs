//! Input validation helpers
//!
//! DTO shape checks go through `validator`; the helpers here cover what the
//! derives cannot express (normalization, password presence, LIKE patterns).

use shared::ErrorCode;
use validator::Validate;

use crate::utils::AppError;

// ── Limits ──────────────────────────────────────────────────────────

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

// ── Helpers ─────────────────────────────────────────────────────────

/// Run the derived `validator` checks, reporting the first failing field
pub fn validate_input<T: Validate>(input: &T) -> Result<(), AppError> {
    input.validate().map_err(AppError::from)
}

/// Emails are compared and stored trimmed; case folding happens in SQL
pub fn normalize_email(email: &str) -> String {
    email.trim().to_string()
}

/// A password that must be present (create paths)
pub fn require_password(password: Option<&str>) -> Result<&str, AppError> {
    match password {
        Some(p) if !p.trim().is_empty() => {
            check_password_length(p)?;
            Ok(p)
        }
        _ => Err(AppError::field("password", "Password is required")),
    }
}

/// A password that replaces the current one only when non-blank (update paths)
pub fn optional_password(password: Option<&str>) -> Result<Option<&str>, AppError> {
    match password {
        Some(p) if !p.trim().is_empty() => {
            check_password_length(p)?;
            Ok(Some(p))
        }
        _ => Ok(None),
    }
}

pub fn check_password_length(password: &str) -> Result<(), AppError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(AppError::Validation {
            code: ErrorCode::PasswordTooShort,
            field: Some("password".into()),
            message: ErrorCode::PasswordTooShort.message().into(),
        });
    }
    if len > MAX_PASSWORD_LEN {
        return Err(AppError::field(
            "password",
            format!("Password is too long (max {MAX_PASSWORD_LEN} characters)"),
        ));
    }
    Ok(())
}

/// `%keyword%` pattern for a case-insensitive `LIKE ... ESCAPE '\'`,
/// or `None` when the keyword is blank (filter disabled)
pub fn like_pattern(keyword: Option<&str>) -> Option<String> {
    let keyword = keyword?.trim();
    if keyword.is_empty() {
        return None;
    }
    let mut escaped = String::with_capacity(keyword.len() + 2);
    escaped.push('%');
    for c in keyword.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    Some(escaped)
}

/// Assignment roles are stored trimmed and upper-case
pub fn normalize_role_in_project(role: &str) -> String {
    role.trim().to_uppercase()
}
