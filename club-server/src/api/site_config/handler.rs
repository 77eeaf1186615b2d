//! Site Config API Handlers

use axum::{Json, extract::State};
use shared::models::{SiteConfig, SiteConfigUpdate};

use crate::auth::CurrentAdmin;
use crate::core::ServerState;
use crate::db::repository::site_config;
use crate::utils::validation::{
    MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{ApiResponse, AppResult};

/// GET /api/site-config
pub async fn get(State(state): State<ServerState>) -> AppResult<ApiResponse<SiteConfig>> {
    let config = site_config::get_or_create(state.pool(), state.now()).await?;
    Ok(ApiResponse::success(config))
}

/// PUT /api/admin/site-config
pub async fn update(
    State(state): State<ServerState>,
    admin: CurrentAdmin,
    Json(payload): Json<SiteConfigUpdate>,
) -> AppResult<ApiResponse<SiteConfig>> {
    if let Some(title) = &payload.site_title {
        validate_required_text(title, "siteTitle", MAX_NOTE_LEN)?;
    }
    validate_optional_text(&payload.welcome_message, "welcomeMessage", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.banner_image_url, "bannerImageUrl", MAX_URL_LEN)?;

    let config = site_config::update(state.pool(), &payload, state.now()).await?;
    tracing::info!(operator = %admin.username, "Site config updated");
    Ok(ApiResponse::success(config))
}
