//! Account API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{AccountDetail, AccountForm, AccountSearch, PasswordReset, Role};
use shared::{ApiResponse, PaginatedResponse};

use crate::core::ServerState;
use crate::utils::{AppResult, ok, ok_message, ok_with_message};

/// Search accounts by keyword, role and status
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<AccountSearch>,
) -> AppResult<Json<ApiResponse<PaginatedResponse<AccountDetail>>>> {
    let page = state.accounts().search(&query).await?;
    Ok(ok(page))
}

pub async fn list_roles(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Role>>>> {
    let roles = state.accounts().list_roles().await?;
    Ok(ok(roles))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<AccountDetail>>> {
    let account = state.accounts().find_by_id(id).await?;
    Ok(ok(account))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AccountForm>,
) -> AppResult<Json<ApiResponse<AccountDetail>>> {
    let account = state.accounts().create(&payload).await?;
    Ok(ok_with_message(account, "Account created successfully"))
}

/// Edit an account; blocking it ends its sessions
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<AccountForm>,
) -> AppResult<Json<ApiResponse<AccountDetail>>> {
    let result = state.accounts().update(id, &payload).await?;
    if let Some(signal) = result.signal {
        state.sessions().apply(signal);
    }
    Ok(ok_with_message(result.account, "Account updated successfully"))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    let signal = state.accounts().delete(id).await?;
    state.sessions().apply(signal);
    Ok(ok_message("Account deleted successfully"))
}

pub async fn reset_password(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PasswordReset>,
) -> AppResult<Json<ApiResponse<()>>> {
    let signal = state.accounts().admin_reset_password(id, &payload).await?;
    state.sessions().apply(signal);
    Ok(ok_message("Password changed successfully"))
}
