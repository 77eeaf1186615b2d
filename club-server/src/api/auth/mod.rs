//! Authentication Routes

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// - /api/auth/login: public
///
/// Logout is client-side: the token is simply discarded.
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/auth/login", post(handler::login))
}
