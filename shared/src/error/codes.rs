//! Unified error codes
//!
//! Every error the server reports carries one of these codes. They are
//! organized by range:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 8xxx: HR domain rule violations
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as a bare `u16` so clients can switch on the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists (unique value taken)
    AlreadyExists = 4,

    // ==================== 1xxx: Auth ====================
    /// Not authenticated
    NotAuthenticated = 1001,
    /// Invalid username or password
    InvalidCredentials = 1002,
    /// Token expired
    TokenExpired = 1003,
    /// Token invalid
    TokenInvalid = 1004,
    /// Session expired (revoked after a password change or logout)
    SessionExpired = 1005,
    /// Account blocked
    AccountLocked = 1006,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin accounts are read-only apart from their status
    CannotModifyAdmin = 2004,
    /// Admin accounts can never be deleted
    CannotDeleteAdmin = 2005,

    // ==================== 8xxx: HR rules ====================
    /// Department still has employees
    DepartmentHasEmployees = 8101,
    /// Employee is already in the department
    AlreadyInDepartment = 8102,
    /// Employee is not in the department
    NotInDepartment = 8103,
    /// Project end date is not after its start date
    InvalidProjectDates = 8201,
    /// Employee already assigned to the project
    AssignmentExists = 8202,
    /// Join date outside the project's bounds
    JoinDateOutOfRange = 8203,
    /// New password and confirmation differ
    PasswordMismatch = 8301,
    /// New password equals the current one
    PasswordUnchanged = 8302,
    /// Password shorter than the minimum length
    PasswordTooShort = 8303,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Default English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::SessionExpired => "Session has expired, please login again",
            ErrorCode::AccountLocked => "Your account has been blocked",

            // Permission
            ErrorCode::PermissionDenied => "Access denied",
            ErrorCode::CannotModifyAdmin => "Admin accounts can only be viewed",
            ErrorCode::CannotDeleteAdmin => "Cannot delete admin accounts",

            // HR
            ErrorCode::DepartmentHasEmployees => "Cannot delete department. It still has employees.",
            ErrorCode::AlreadyInDepartment => "Employee is already in this department",
            ErrorCode::NotInDepartment => "Employee is not in this department",
            ErrorCode::InvalidProjectDates => "End date must be after start date",
            ErrorCode::AssignmentExists => "This employee is already assigned to this project",
            ErrorCode::JoinDateOutOfRange => "Join date is outside the project period",
            ErrorCode::PasswordMismatch => "New password and confirm password do not match",
            ErrorCode::PasswordUnchanged => "New password must be different from current password",
            ErrorCode::PasswordTooShort => "Password must be at least 6 characters",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::SessionExpired),
            1006 => Ok(ErrorCode::AccountLocked),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2004 => Ok(ErrorCode::CannotModifyAdmin),
            2005 => Ok(ErrorCode::CannotDeleteAdmin),

            // HR
            8101 => Ok(ErrorCode::DepartmentHasEmployees),
            8102 => Ok(ErrorCode::AlreadyInDepartment),
            8103 => Ok(ErrorCode::NotInDepartment),
            8201 => Ok(ErrorCode::InvalidProjectDates),
            8202 => Ok(ErrorCode::AssignmentExists),
            8203 => Ok(ErrorCode::JoinDateOutOfRange),
            8301 => Ok(ErrorCode::PasswordMismatch),
            8302 => Ok(ErrorCode::PasswordUnchanged),
            8303 => Ok(ErrorCode::PasswordTooShort),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::AlreadyExists.code(), 4);
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1002);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::DepartmentHasEmployees.code(), 8101);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_try_from_round_trips_every_code() {
        let all = [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::AlreadyExists,
            ErrorCode::NotAuthenticated,
            ErrorCode::InvalidCredentials,
            ErrorCode::TokenExpired,
            ErrorCode::TokenInvalid,
            ErrorCode::SessionExpired,
            ErrorCode::AccountLocked,
            ErrorCode::PermissionDenied,
            ErrorCode::CannotModifyAdmin,
            ErrorCode::CannotDeleteAdmin,
            ErrorCode::DepartmentHasEmployees,
            ErrorCode::AlreadyInDepartment,
            ErrorCode::NotInDepartment,
            ErrorCode::InvalidProjectDates,
            ErrorCode::AssignmentExists,
            ErrorCode::JoinDateOutOfRange,
            ErrorCode::PasswordMismatch,
            ErrorCode::PasswordUnchanged,
            ErrorCode::PasswordTooShort,
            ErrorCode::InternalError,
            ErrorCode::DatabaseError,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_invalid_code() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
        assert_eq!(ErrorCode::try_from(1), Err(InvalidErrorCode(1)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::AccountLocked).unwrap();
        assert_eq!(json, "1006");
        let back: ErrorCode = serde_json::from_str("8202").unwrap();
        assert_eq!(back, ErrorCode::AssignmentExists);
    }
}
