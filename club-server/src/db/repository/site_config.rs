//! Site Config Repository (singleton, id = 1)

use shared::models::{DEFAULT_SITE_TITLE, DEFAULT_WELCOME_MESSAGE, SiteConfig, SiteConfigUpdate};
use sqlx::SqlitePool;

use super::RepoResult;

const SITE_CONFIG_COLUMNS: &str = "id, site_title, welcome_message, banner_image_url, updated_at";

/// Fetch the singleton, inserting defaults on first access
pub async fn get_or_create(pool: &SqlitePool, now: i64) -> RepoResult<SiteConfig> {
    sqlx::query(
        "INSERT OR IGNORE INTO site_config (id, site_title, welcome_message, banner_image_url, updated_at) \
         VALUES (1, ?, ?, NULL, ?)",
    )
    .bind(DEFAULT_SITE_TITLE)
    .bind(DEFAULT_WELCOME_MESSAGE)
    .bind(now)
    .execute(pool)
    .await?;

    let config = sqlx::query_as::<_, SiteConfig>(&format!(
        "SELECT {SITE_CONFIG_COLUMNS} FROM site_config WHERE id = 1"
    ))
    .fetch_one(pool)
    .await?;
    Ok(config)
}

/// Apply a partial update; an empty banner URL clears the banner
pub async fn update(pool: &SqlitePool, data: &SiteConfigUpdate, now: i64) -> RepoResult<SiteConfig> {
    let current = get_or_create(pool, now).await?;

    let banner = match &data.banner_image_url {
        Some(url) if url.trim().is_empty() => None,
        Some(url) => Some(url.trim().to_string()),
        None => current.banner_image_url,
    };

    let config = sqlx::query_as::<_, SiteConfig>(&format!(
        "UPDATE site_config SET site_title = ?, welcome_message = ?, banner_image_url = ?, updated_at = ? \
         WHERE id = 1 RETURNING {SITE_CONFIG_COLUMNS}"
    ))
    .bind(data.site_title.as_deref().unwrap_or(&current.site_title))
    .bind(data.welcome_message.as_deref().unwrap_or(&current.welcome_message))
    .bind(banner)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(config)
}
