//! Data models
//!
//! Shared between club-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod admission;
pub mod club;
pub mod registration;
pub mod site_config;

// Re-exports
pub use admission::*;
pub use club::*;
pub use registration::*;
pub use site_config::*;
