//! 认证授权中间件
//!
//! Every request under `/api/` is classified against the policy table before
//! it reaches a handler.
//!
//! | 情况 | 结果 |
//! |------|------|
//! | 未映射路径 / `.well-known` 探测 | 404 (空响应体) |
//! | 公共路由 / `OPTIONS` | 放行 |
//! | 无 Authorization 头 | 401 NotAuthenticated |
//! | 令牌过期 / 无效 | 401 TokenExpired / TokenInvalid |
//! | 会话已被撤销 | 401 SessionExpired |
//! | 角色不足 | 403 PermissionDenied |

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::policy::{Decision, Route, authorize, classify};
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// Resolve the caller from the `Authorization` header
pub(crate) fn authenticate(
    state: &ServerState,
    headers: &http::HeaderMap,
    uri: &http::Uri,
) -> Result<CurrentUser, AppError> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header).ok_or(AppError::InvalidToken)?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", uri));
            return Err(AppError::Unauthorized);
        }
    };

    let claims = state.jwt_service().validate_token(token).map_err(|e| {
        security_log!(
            "WARN",
            "auth_failed",
            error = format!("{}", e),
            uri = format!("{:?}", uri)
        );
        match e {
            JwtError::ExpiredToken => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        }
    })?;

    let user = CurrentUser::try_from(claims).map_err(|_| AppError::InvalidToken)?;

    if !state.sessions().is_current(user.account_id, user.epoch) {
        security_log!(
            "WARN",
            "session_revoked",
            account_id = user.account_id,
            username = user.username.clone()
        );
        return Err(AppError::SessionExpired);
    }

    Ok(user)
}

/// 认证 + 授权中间件
///
/// On success the [`CurrentUser`] is inserted into the request extensions.
pub async fn authorize_request(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let intent = match classify(req.method(), req.uri().path()) {
        Route::Public => return Ok(next.run(req).await),
        Route::NotFound => return Ok(StatusCode::NOT_FOUND.into_response()),
        Route::Protected(intent) => intent,
    };

    let user = authenticate(&state, req.headers(), req.uri())?;

    match authorize(Some(user.roles.as_slice()), intent) {
        Decision::Allow => {}
        Decision::Unauthenticated => return Err(AppError::Unauthorized),
        Decision::Deny => {
            security_log!(
                "WARN",
                "permission_denied",
                account_id = user.account_id,
                username = user.username.clone(),
                intent = format!("{:?}", intent),
                uri = req.uri().path().to_string()
            );
            return Err(AppError::forbidden("Access denied"));
        }
    }

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
