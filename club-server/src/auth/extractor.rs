//! CurrentAdmin extractor
//!
//! Reuses the value inserted by [`super::require_admin`] when present,
//! otherwise validates the header itself.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::AppError;
use crate::auth::CurrentAdmin;
use crate::auth::middleware::authenticate;
use crate::core::ServerState;

impl FromRequestParts<ServerState> for CurrentAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(admin) = parts.extensions.get::<CurrentAdmin>() {
            return Ok(admin.clone());
        }

        let admin = authenticate(
            &state.jwt_service,
            parts.headers.get(http::header::AUTHORIZATION),
            &parts.uri,
        )?;
        parts.extensions.insert(admin.clone());
        Ok(admin)
    }
}
