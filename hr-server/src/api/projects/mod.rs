//! Project API Module
//!
//! Reads are open to every role; an EMPLOYEE-only caller only sees the
//! projects they are assigned to. Mutations are ADMIN / MANAGER.

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

/// Project router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/projects", routes())
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
        .route(
            "/{id}/assignments",
            get(handler::assignments).post(handler::add_assignment),
        )
        .route("/assignments/{id}", delete(handler::remove_assignment))
}
