//! Club Registration Server
//!
//! # Overview
//!
//! Students register for after-school clubs; an administrator manages the
//! club catalog. The core is the admission engine, which decides each
//! attempt against the registration window, duplicate and schedule-conflict
//! rules, then seats the student as primary, waitlisted, or rejects as full.
//!
//! # Module layout
//!
//! ```text
//! club-server/src/
//! ├── core/          # config, state, errors, server
//! ├── auth/          # JWT + Argon2 admin gate
//! ├── admission/     # decision engine, keyed locks, attempt service
//! ├── services/      # club catalog
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool, migrations, repositories
//! └── utils/         # logging, time, validation, clock
//! ```

pub mod admission;
pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export public types
pub use admission::AdmissionService;
pub use auth::{CurrentAdmin, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - supports tracing format specifiers
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env` and start logging
///
/// Runs before [`Config::from_env`] so configuration warnings are visible.
pub fn setup_environment() {
    let _ = dotenvy::dotenv();

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty());
    let json = std::env::var("ENVIRONMENT").is_ok_and(|e| e == "production");
    init_logger_with_file(&log_level, json, log_dir.as_deref());
}
