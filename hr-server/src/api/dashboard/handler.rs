use axum::{Json, extract::State};
use shared::ApiResponse;
use shared::models::DashboardView;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::time::today;
use crate::utils::{AppResult, ok};

pub async fn dashboard(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<DashboardView>>> {
    let view = state
        .dashboard()
        .view_for(user.account_id, &user.roles, today())
        .await?;
    Ok(ok(view))
}
