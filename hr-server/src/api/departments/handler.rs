//! Department API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::ApiResponse;
use shared::models::{
    Department, DepartmentForm, DepartmentListQuery, DepartmentSummary, EmployeeDetail,
};

use crate::core::ServerState;
use crate::utils::{AppResult, ok, ok_message, ok_with_message};

/// All departments with member counts (`sort_by`, `sort_dir`)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<DepartmentListQuery>,
) -> AppResult<Json<ApiResponse<Vec<DepartmentSummary>>>> {
    let departments = state.departments().list(&query).await?;
    Ok(ok(departments))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Department>>> {
    let department = state.departments().find_by_id(id).await?;
    Ok(ok(department))
}

pub async fn members(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Vec<EmployeeDetail>>>> {
    let members = state.departments().members(id).await?;
    Ok(ok(members))
}

/// Employees outside the department
pub async fn candidates(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Vec<EmployeeDetail>>>> {
    let candidates = state.departments().non_members(id).await?;
    Ok(ok(candidates))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DepartmentForm>,
) -> AppResult<Json<ApiResponse<Department>>> {
    let department = state.departments().create(&payload).await?;
    Ok(ok_with_message(department, "Department created successfully"))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DepartmentForm>,
) -> AppResult<Json<ApiResponse<Department>>> {
    let department = state.departments().update(id, &payload).await?;
    Ok(ok_with_message(department, "Department updated successfully"))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.departments().delete(id).await?;
    Ok(ok_message("Department deleted successfully"))
}

pub async fn add_employee(
    State(state): State<ServerState>,
    Path((id, employee_id)): Path<(i64, i64)>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.departments().add_employee(id, employee_id).await?;
    Ok(ok_message("Employee added to department successfully"))
}

pub async fn remove_employee(
    State(state): State<ServerState>,
    Path((id, employee_id)): Path<(i64, i64)>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.departments().remove_employee(id, employee_id).await?;
    Ok(ok_message("Employee removed from department successfully"))
}
