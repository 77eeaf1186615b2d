//! Site Config Model

use serde::{Deserialize, Serialize};

pub const DEFAULT_SITE_TITLE: &str = "School Club Registration";
pub const DEFAULT_WELCOME_MESSAGE: &str = "Welcome, everyone, to our club activities!";

/// Display settings (singleton, id = 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub id: i64,
    pub site_title: String,
    pub welcome_message: String,
    pub banner_image_url: Option<String>,
    pub updated_at: i64,
}

/// Update site config payload
///
/// An empty `bannerImageUrl` clears the banner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfigUpdate {
    pub site_title: Option<String>,
    pub welcome_message: Option<String>,
    pub banner_image_url: Option<String>,
}
