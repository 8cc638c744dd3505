//! Authentication Handlers
//!
//! Login issues a JWT bound to the account's current session epoch; logout
//! advances the epoch so every token issued so far stops working.

use axum::{Json, extract::State};
use shared::ApiResponse;
use shared::models::{LoginRequest, LoginResponse, SessionUser};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::security_log;
use crate::utils::{AppError, AppResult, ok, ok_message};

/// Login handler
///
/// Unknown user and wrong password share one message; blocked accounts get
/// their own.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let account = match state.accounts().authenticate(&req.username, &req.password).await {
        Ok(account) => account,
        Err(e) => {
            security_log!(
                "WARN",
                "login_failed",
                username = req.username.clone(),
                reason = e.code().to_string()
            );
            return Err(e);
        }
    };

    let account_id = account.account.id;
    let roles = account.role_names();
    let epoch = state.sessions().current_epoch(account_id);

    let token = state
        .jwt_service()
        .generate_token(account_id, &account.account.username, &roles, epoch)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        account_id,
        username = %account.account.username,
        roles = ?roles,
        "User logged in successfully"
    );

    Ok(ok(LoginResponse {
        token,
        expires_in: state.jwt_service().expires_in(),
        user: SessionUser {
            account_id,
            username: account.account.username,
            roles,
        },
    }))
}

/// Logout handler
pub async fn logout(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Json<ApiResponse<()>> {
    let epoch = state.sessions().revoke(user.account_id);
    security_log!(
        "INFO",
        "logout",
        account_id = user.account_id,
        username = user.username.clone(),
        epoch = epoch
    );
    ok_message("Logged out successfully")
}
