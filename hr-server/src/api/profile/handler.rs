//! Own Profile Handlers
//!
//! Everything here is scoped to the caller's own account.

use axum::{Json, extract::State};
use serde::Serialize;
use shared::ApiResponse;
use shared::models::{AccountDetail, AssignmentDetail, ChangePassword, EmployeeDetail, ProfileForm};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppResult, ok, ok_message, ok_with_message};

/// 个人资料
#[derive(Serialize)]
pub struct ProfileResponse {
    pub account: AccountDetail,
    /// Accounts without an employee record (e.g. seeded admins) get `null`
    pub employee: Option<EmployeeDetail>,
}

pub async fn get_profile(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<ProfileResponse>>> {
    let account = state.accounts().find_by_id(user.account_id).await?;
    let employee = state.employees().find_by_account_id(user.account_id).await?;
    Ok(ok(ProfileResponse { account, employee }))
}

pub async fn update_profile(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProfileForm>,
) -> AppResult<Json<ApiResponse<EmployeeDetail>>> {
    let employee = state
        .employees()
        .update_own_profile(user.account_id, &payload)
        .await?;
    Ok(ok_with_message(employee, "Profile updated successfully"))
}

/// Change own password; every session of the account ends
pub async fn change_password(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ChangePassword>,
) -> AppResult<Json<ApiResponse<()>>> {
    let signal = state
        .accounts()
        .change_own_password(user.account_id, &payload)
        .await?;
    state.sessions().apply(signal);
    Ok(ok_message("Password changed successfully. Please login again."))
}

/// Own assignments; empty when the caller has no employee record
pub async fn my_projects(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<AssignmentDetail>>>> {
    let assignments = match state.employees().find_by_account_id(user.account_id).await? {
        Some(me) => state.projects().assignments_for_employee(me.id).await?,
        None => Vec::new(),
    };
    Ok(ok(assignments))
}
