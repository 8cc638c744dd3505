//! HTTP API 路由
//!
//! One router per resource; every route is gated by
//! [`authorize_request`](crate::auth::authorize_request) using the central
//! policy table.

use axum::{Router, middleware};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::auth::authorize_request;
use crate::core::ServerState;

pub mod accounts;
pub mod auth;
pub mod dashboard;
pub mod departments;
pub mod employees;
pub mod health;
pub mod profile;
pub mod projects;

/// In-flight request cap, shared by all routes
const MAX_IN_FLIGHT: usize = 512;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Public
        .merge(health::router())
        .merge(auth::router())
        // ADMIN
        .merge(accounts::router())
        // ADMIN / MANAGER
        .merge(departments::router())
        .merge(employees::router())
        .merge(projects::router())
        // Any authenticated caller
        .merge(profile::router())
        .merge(dashboard::router())
}

/// Build a fully configured application with all middleware
///
/// Used by the HTTP server and by in-process tests (`oneshot`).
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // Authentication + role check, injects CurrentUser
        .layer(middleware::from_fn_with_state(
            state.clone(),
            authorize_request,
        ))
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - propagated to the response
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(GlobalConcurrencyLimitLayer::new(MAX_IN_FLIGHT))
}
