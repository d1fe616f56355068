//! Router assembly
//!
//! [`build_router`] registers every API route; [`build_app`] adds the
//! middleware stack. Both the HTTP server and integration tests use
//! [`build_app`].

use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderValue, StatusCode};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::api;
use crate::core::ServerState;
use crate::middleware;

/// Custom request ID generator
#[derive(Clone, Default)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Slow handlers are answered with 408 once `timeout_ms` elapses
fn timeout_layer(timeout_ms: u64) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, Duration::from_millis(timeout_ms))
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Health API - public
        .merge(api::health::router())
        // Diner APIs - public
        .merge(api::tables::router())
        .merge(api::menu::router())
        .merge(api::cart::router())
        .merge(api::orders::router())
        // Kitchen API - gated except login
        .merge(api::kitchen::router())
}

/// Build a fully configured application with all middleware and state
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // ========== Application Middleware ==========
        // Kitchen gate - innermost, runs right before the handlers
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_kitchen_access,
        ))
        // ========== Tower HTTP Middleware ==========
        .layer(timeout_layer(state.config.request_timeout_ms))
        // Request logging
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        // Trace - Request tracing
        .layer(TraceLayer::new_for_http())
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::x_request_id())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::x_request_id(XRequestId))
        // CORS - outermost so preflight never reaches the gate
        .layer(CorsLayer::permissive())
}
