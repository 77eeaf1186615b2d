//! Site Config API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/site-config | GET | none |
//! | /api/admin/site-config | PUT | admin |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/site-config", get(handler::get))
}

/// Caller adds the admin gate
pub fn admin_router() -> Router<ServerState> {
    Router::new().route("/api/admin/site-config", put(handler::update))
}
