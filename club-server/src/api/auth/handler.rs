//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State};
use shared::client::{LoginRequest, LoginResponse};

use crate::auth::password;
use crate::core::ServerState;
use crate::security_log;
use crate::utils::validation::MAX_PASSWORD_LEN;
use crate::utils::{ApiResponse, AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/login
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let admin = &state.config.admin;

    // Hash is checked whatever the username
    let password_valid = req.password.chars().count() <= MAX_PASSWORD_LEN
        && password::verify_password(&req.password, &admin.password_hash)
            .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    let username_valid = req.username == admin.username;

    // Fixed delay before the verdict
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    if !(username_valid && password_valid) {
        tracing::warn!(username = %req.username, "Login failed - invalid credentials");
        security_log!("WARN", "login_failed", username = req.username.as_str());
        return Err(AppError::invalid_credentials());
    }

    let issued = state
        .jwt_service
        .generate_token(&admin.username)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(username = %admin.username, "Admin logged in");

    Ok(ApiResponse::success(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at,
        username: admin.username.clone(),
    }))
}
