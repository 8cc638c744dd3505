//! Department API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Department router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/departments", routes())
}

fn routes() -> Router<ServerState> {
    // 读取路由: ADMIN / MANAGER
    // 管理路由: 仅 ADMIN (由授权中间件按方法区分)
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/employees", get(handler::members))
        .route("/{id}/candidates", get(handler::candidates))
        .route(
            "/{id}/employees/{employee_id}",
            post(handler::add_employee).delete(handler::remove_employee),
        )
}
