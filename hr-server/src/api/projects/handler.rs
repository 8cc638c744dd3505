//! Project API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{AssignmentDetail, AssignmentForm, Project, ProjectAssignment, ProjectForm};
use shared::{ApiResponse, PageRequest, PaginatedResponse};

use crate::auth::{CurrentUser, ProjectScope, project_scope};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::{AppError, AppResult, ok, ok_message, ok_with_message};

/// Employee record behind the caller, if any
async fn own_employee_id(state: &ServerState, user: &CurrentUser) -> AppResult<Option<i64>> {
    Ok(state
        .employees()
        .find_by_account_id(user.account_id)
        .await?
        .map(|e| e.id))
}

/// EMPLOYEE-only callers may open a project only when assigned to it
async fn ensure_visible(state: &ServerState, user: &CurrentUser, project_id: i64) -> AppResult<()> {
    if project_scope(&user.roles) == ProjectScope::All {
        return Ok(());
    }

    let assigned = match own_employee_id(state, user).await? {
        Some(employee_id) => state.projects().is_assigned(project_id, employee_id).await?,
        None => false,
    };
    if !assigned {
        security_log!(
            "WARN",
            "project_access_denied",
            account_id = user.account_id,
            project_id = project_id
        );
        return Err(AppError::forbidden("You are not assigned to this project"));
    }
    Ok(())
}

/// List projects visible to the caller
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(page): Query<PageRequest>,
) -> AppResult<Json<ApiResponse<PaginatedResponse<Project>>>> {
    let projects = match project_scope(&user.roles) {
        ProjectScope::All => state.projects().list_all(page).await?,
        ProjectScope::AssignedOnly => match own_employee_id(&state, &user).await? {
            Some(employee_id) => state.projects().list_for_employee(employee_id, page).await?,
            None => PaginatedResponse::empty(page.page(), page.limit_or(state.config.page_size)),
        },
    };
    Ok(ok(projects))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Project>>> {
    ensure_visible(&state, &user, id).await?;
    let project = state.projects().find_by_id(id).await?;
    Ok(ok(project))
}

pub async fn assignments(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Vec<AssignmentDetail>>>> {
    ensure_visible(&state, &user, id).await?;
    let assignments = state.projects().assignments(id).await?;
    Ok(ok(assignments))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProjectForm>,
) -> AppResult<Json<ApiResponse<Project>>> {
    let project = state.projects().create(&payload).await?;
    Ok(ok_with_message(project, "Project created successfully"))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProjectForm>,
) -> AppResult<Json<ApiResponse<Project>>> {
    let project = state.projects().update(id, &payload).await?;
    Ok(ok_with_message(project, "Project updated successfully"))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.projects().delete(id).await?;
    Ok(ok_message("Project deleted successfully"))
}

pub async fn add_assignment(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<AssignmentForm>,
) -> AppResult<Json<ApiResponse<ProjectAssignment>>> {
    let assignment = state.projects().add_assignment(id, &payload).await?;
    Ok(ok_with_message(assignment, "Employee assigned to project successfully"))
}

pub async fn remove_assignment(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<ProjectAssignment>>> {
    let removed = state.projects().remove_assignment(id).await?;
    Ok(ok_with_message(removed, "Assignment removed successfully"))
}
