//! API routes
//!
//! # Structure
//!
//! - [`health`] - liveness
//! - [`auth`] - admin login
//! - [`clubs`] - club listing, registration attempts, admin club management
//! - [`site_config`] - display settings
//!
//! Everything under `/api/admin` sits behind [`require_admin`].

pub mod auth;
pub mod clubs;
pub mod health;
pub mod middleware;
pub mod site_config;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::require_admin;
use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no tower middleware)
pub fn build_router(state: &ServerState) -> Router<ServerState> {
    let admin = Router::new()
        .merge(clubs::admin_router())
        .merge(site_config::admin_router())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ));

    Router::new()
        // Public
        .merge(health::router())
        .merge(auth::router())
        .merge(clubs::router())
        .merge(site_config::router())
        // Admin
        .merge(admin)
}

/// Build a fully configured application with all middleware
///
/// Used by the HTTP server and by the integration tests.
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router(state)
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Request logging
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        // Trace - Request tracing
        .layer(TraceLayer::new_for_http())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
}
