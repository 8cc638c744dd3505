//! Dashboard API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// GET /api/dashboard - view chosen by the caller's highest role
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/dashboard", get(handler::dashboard))
}
