//! Authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::{CurrentAdmin, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// Admin gate
///
/// Validates `Authorization: Bearer <token>` and inserts [`CurrentAdmin`]
/// into the request extensions.
///
/// | Failure | Status |
/// |---------|--------|
/// | missing header | 401 NotAuthenticated |
/// | malformed header / bad token | 401 TokenInvalid |
/// | expired token | 401 TokenExpired |
pub async fn require_admin(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS preflight
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let admin = authenticate(
        &state.jwt_service,
        req.headers().get(http::header::AUTHORIZATION),
        req.uri(),
    )?;
    req.extensions_mut().insert(admin);
    Ok(next.run(req).await)
}

pub(crate) fn authenticate(
    jwt_service: &JwtService,
    header: Option<&http::HeaderValue>,
    uri: &http::Uri,
) -> Result<CurrentAdmin, AppError> {
    let token = match header.and_then(|h| h.to_str().ok()) {
        Some(value) => JwtService::extract_from_header(value)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = uri.to_string());
            return Err(AppError::not_authenticated());
        }
    };

    let result = jwt_service
        .validate_token(token)
        .and_then(CurrentAdmin::try_from);

    result.map_err(|e| {
        security_log!(
            "WARN",
            "auth_failed",
            error = e.to_string(),
            uri = uri.to_string()
        );
        match e {
            JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })
}
