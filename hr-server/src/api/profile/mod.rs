//! Own Profile API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/profile | GET / PUT | 个人资料 / 编辑 |
//! | /api/profile/password | PUT | 修改密码 (成功后需重新登录) |
//! | /api/profile/projects | GET | 我参与的项目 |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/profile", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get_profile).put(handler::update_profile))
        .route("/password", put(handler::change_password))
        .route("/projects", get(handler::my_projects))
}
