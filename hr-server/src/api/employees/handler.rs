//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{EmployeeDetail, EmployeeForm, EmployeeSearch, PasswordReset};
use shared::{ApiResponse, PaginatedResponse};

use crate::core::ServerState;
use crate::utils::{AppResult, ok, ok_message, ok_with_message};

/// Search employees by name and department
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<EmployeeSearch>,
) -> AppResult<Json<ApiResponse<PaginatedResponse<EmployeeDetail>>>> {
    let page = state.employees().search(&query).await?;
    Ok(ok(page))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<EmployeeDetail>>> {
    let employee = state.employees().find_by_id(id).await?;
    Ok(ok(employee))
}

/// Create an employee together with its account
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeForm>,
) -> AppResult<Json<ApiResponse<EmployeeDetail>>> {
    let employee = state.employees().create(&payload).await?;
    Ok(ok_with_message(employee, "Employee created successfully"))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeeForm>,
) -> AppResult<Json<ApiResponse<EmployeeDetail>>> {
    let result = state.employees().update(id, &payload).await?;
    if let Some(signal) = result.signal {
        state.sessions().apply(signal);
    }
    Ok(ok_with_message(result.employee, "Employee updated successfully"))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    let signal = state.employees().delete(id).await?;
    state.sessions().apply(signal);
    Ok(ok_message("Employee deleted successfully"))
}

/// Administrator password change for an employee's account
pub async fn change_password(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PasswordReset>,
) -> AppResult<Json<ApiResponse<()>>> {
    let signal = state.employees().admin_change_password(id, &payload).await?;
    state.sessions().apply(signal);
    Ok(ok_message("Password changed successfully"))
}
