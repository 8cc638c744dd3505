//! Account API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/accounts | GET / POST | 搜索 / 创建账号 |
//! | /api/accounts/{id} | GET / PUT / DELETE | 账号详情 / 编辑 / 删除 |
//! | /api/accounts/{id}/password | PUT | 管理员重置密码 |
//! | /api/roles | GET | 角色列表 |
//!
//! All routes are ADMIN only.

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

/// Account router
pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/accounts", routes())
        .route("/api/roles", get(handler::list_roles))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/password", put(handler::reset_password))
}
