//! Club API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/clubs | GET | none |
//! | /api/clubs/{id} | GET | none |
//! | /api/clubs/{id}/registrations | POST | none |
//! | /api/admin/clubs | GET, POST | admin |
//! | /api/admin/clubs/{id} | PUT, DELETE | admin |
//! | /api/admin/clubs/{id}/registrations | GET | admin |

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/clubs", public_routes())
}

/// Caller adds the admin gate
pub fn admin_router() -> Router<ServerState> {
    Router::new().nest("/api/admin/clubs", admin_routes())
}

fn public_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/registrations", post(handler::register))
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::admin_list).post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route("/{id}/registrations", get(handler::registrations))
}
