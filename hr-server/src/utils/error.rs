//! 统一错误处理
//!
//! - [`AppError`] - 应用错误枚举, rendered as a [`shared::ApiResponse`]
//! - [`ok`] / [`ok_with_message`] / [`ok_message`] - success body helpers
//!
//! | Variant | HTTP | Code |
//! |---------|------|------|
//! | Validation | 400 | ValidationFailed or a specific rule code |
//! | Duplicate | 409 | AlreadyExists, `details.field` names the column |
//! | NotFound | 404 | NotFound |
//! | Conflict | 400 | CannotDeleteAdmin, DepartmentHasEmployees, ... |
//! | InvalidCredential | 400 | InvalidCredentials |
//! | Unauthorized / TokenExpired / InvalidToken / SessionExpired / AccountLocked | 401 | auth codes |
//! | Forbidden | 403 | PermissionDenied |
//! | Database / Internal | 500 | generic body, detail only in logs |

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shared::{ApiResponse, ErrorCode};
use tracing::error;
use validator::ValidationErrors;

use crate::auth::password::HashError;
use crate::db::repository::{RepoError, UniqueField};

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 表单 / 业务规则 (4xx) ==========
    #[error("{message}")]
    /// 输入不满足业务规则 (400)
    Validation {
        code: ErrorCode,
        field: Option<String>,
        message: String,
    },

    #[error("{message}")]
    /// 唯一值冲突 (409)
    Duplicate { field: &'static str, message: String },

    #[error("{entity} not found with id: {id}")]
    /// 资源不存在 (404)
    NotFound { entity: &'static str, id: i64 },

    #[error("{message}")]
    /// 结构性约束冲突 (400)
    Conflict { code: ErrorCode, message: String },

    #[error("{0}")]
    /// 当前密码错误 / 登录失败 (400)
    InvalidCredential(String),

    // ========== 认证错误 (401) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Session has expired, please login again")]
    SessionExpired,

    #[error("Your account has been blocked")]
    AccountLocked,

    // ========== 权限错误 (403) ==========
    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== 系统错误 (5xx) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// General form error with no specific field
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            code: ErrorCode::ValidationFailed,
            field: None,
            message: message.into(),
        }
    }

    /// Form error attached to one field
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            code: ErrorCode::ValidationFailed,
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Business rule violation reported as a form error
    pub fn rule(code: ErrorCode) -> Self {
        Self::rule_with_message(code, code.message())
    }

    pub fn rule_with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            field: None,
            message: message.into(),
        }
    }

    pub fn duplicate(field: UniqueField) -> Self {
        Self::Duplicate {
            field: field.name(),
            message: field.message().to_string(),
        }
    }

    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn conflict(code: ErrorCode) -> Self {
        Self::conflict_with_message(code, code.message())
    }

    pub fn conflict_with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            message: message.into(),
        }
    }

    /// Uniform login failure message, no username enumeration
    pub fn invalid_credentials() -> Self {
        Self::InvalidCredential(ErrorCode::InvalidCredentials.message().to_string())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// The code reported to the client
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::Duplicate { .. } => ErrorCode::AlreadyExists,
            AppError::NotFound { .. } => ErrorCode::NotFound,
            AppError::Conflict { code, .. } => *code,
            AppError::InvalidCredential(_) => ErrorCode::InvalidCredentials,
            AppError::Unauthorized => ErrorCode::NotAuthenticated,
            AppError::TokenExpired => ErrorCode::TokenExpired,
            AppError::InvalidToken => ErrorCode::TokenInvalid,
            AppError::SessionExpired => ErrorCode::SessionExpired,
            AppError::AccountLocked => ErrorCode::AccountLocked,
            AppError::Forbidden(_) => ErrorCode::PermissionDenied,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Field named by a field-level error
    pub fn field_name(&self) -> Option<&str> {
        match self {
            AppError::Validation { field, .. } => field.as_deref(),
            AppError::Duplicate { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();

        let mut body = match &self {
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                ApiResponse::error(code)
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                ApiResponse::error(code)
            }
            AppError::Forbidden(_) => ApiResponse::error(code),
            AppError::NotFound { entity, id } => {
                ApiResponse::error_with_message(code, self.to_string())
                    .with_detail("entity", *entity)
                    .with_detail("id", *id)
            }
            _ => ApiResponse::error_with_message(code, self.to_string()),
        };

        if let Some(field) = self.field_name() {
            body = body.with_detail("field", field);
        }

        (code.http_status(), Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Duplicate(field) => AppError::duplicate(field),
            RepoError::AssignmentExists => AppError::conflict(ErrorCode::AssignmentExists),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::from(err).into()
    }
}

impl From<HashError> for AppError {
    fn from(err: HashError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    /// Reports the first failing field, in field-name order
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));

        match fields.first() {
            Some((field, errs)) => {
                let message = errs
                    .iter()
                    .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| format!("{field} is invalid"));
                AppError::field(field.to_string(), message)
            }
            None => AppError::validation(ErrorCode::ValidationFailed.message()),
        }
    }
}

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success_with_message(message, data))
}

/// Success with a flash message and no payload
pub fn ok_message(message: impl Into<String>) -> Json<ApiResponse<()>> {
    let mut body = ApiResponse::ok();
    body.message = message.into();
    Json(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use http::StatusCode;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_duplicate_names_field() {
        let (status, body) = render(AppError::duplicate(UniqueField::Phone)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], 4);
        assert_eq!(body["details"]["field"], "phone");
    }

    #[tokio::test]
    async fn test_not_found() {
        let (status, body) = render(AppError::not_found("Department", 7)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Department not found with id: 7");
        assert_eq!(body["details"]["id"], 7);
    }

    #[tokio::test]
    async fn test_conflict_is_bad_request() {
        let (status, body) = render(AppError::conflict(ErrorCode::CannotDeleteAdmin)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 2005);
    }

    #[tokio::test]
    async fn test_forbidden() {
        let (status, body) = render(AppError::forbidden("DepartmentManage")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], 2001);
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let (status, body) = render(AppError::database("no such table: secrets")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Database error");
        assert!(body.get("details").is_none());
    }

    #[test]
    fn test_validation_errors_pick_first_field() {
        use shared::models::DepartmentForm;
        use validator::Validate;

        let form = DepartmentForm {
            name: "X".into(),
            description: None,
        };
        let err = AppError::from(form.validate().unwrap_err());
        assert_eq!(err.field_name(), Some("name"));
        assert_eq!(
            err.to_string(),
            "Department name must be between 2 and 50 characters"
        );
    }
}
