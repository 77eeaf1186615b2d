use chrono_tz::Tz;

use crate::auth::{JwtConfig, password};
use crate::core::ServerError;

/// The single administrator account
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub username: String,
    /// Argon2 PHC string
    pub password_hash: String,
}

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATABASE_PATH | club_registration.db | SQLite file |
/// | HTTP_PORT | 3000 | HTTP port |
/// | ENVIRONMENT | development | development / staging / production |
/// | TIMEZONE | Asia/Taipei | school time zone |
/// | ADMIN_USERNAME | admin | admin account |
/// | ADMIN_PASSWORD_HASH | - | argon2 PHC string |
/// | ADMIN_PASSWORD | - | plain password, development only |
/// | JWT_SECRET | generated in development | HS256 secret (>= 32 chars) |
/// | JWT_EXPIRATION_MINUTES | 480 | token lifetime |
/// | LOG_LEVEL | info | default log filter |
/// | LOG_DIR | - | rolling log file directory |
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    /// Zone in which class times and window inputs are interpreted
    pub timezone: Tz,
    pub admin: AdminAccount,
    pub jwt: JwtConfig,
    pub log_level: String,
    pub log_dir: Option<String>,
}

const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Taipei;
const DEV_ADMIN_PASSWORD: &str = "admin";

impl Config {
    /// Load configuration from environment variables
    ///
    /// Outside development, missing secrets are fatal.
    pub fn from_env() -> Result<Self, ServerError> {
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let is_dev = environment == "development";

        let timezone = match std::env::var("TIMEZONE") {
            Ok(name) => parse_timezone(&name)?,
            Err(_) => DEFAULT_TIMEZONE,
        };

        let jwt = JwtConfig::from_env(is_dev)
            .map_err(|e| ServerError::Config(e.to_string()))?;

        Ok(Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "club_registration.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            timezone,
            admin: load_admin_account(is_dev, &environment)?,
            jwt,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            environment,
        })
    }
}

fn parse_timezone(name: &str) -> Result<Tz, ServerError> {
    name.parse::<Tz>()
        .map_err(|_| ServerError::Config(format!("Unknown TIMEZONE: {name}")))
}

fn load_admin_account(is_dev: bool, environment: &str) -> Result<AdminAccount, ServerError> {
    let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into());

    if let Ok(hash) = std::env::var("ADMIN_PASSWORD_HASH")
        && !hash.is_empty()
    {
        password::validate_hash(&hash)
            .map_err(|e| ServerError::Config(format!("ADMIN_PASSWORD_HASH is invalid: {e}")))?;
        return Ok(AdminAccount {
            username,
            password_hash: hash,
        });
    }

    if !is_dev {
        return Err(ServerError::Config(format!(
            "ADMIN_PASSWORD_HASH must be set in {environment} environment"
        )));
    }

    let plain = match std::env::var("ADMIN_PASSWORD") {
        Ok(p) if !p.is_empty() => p,
        _ => {
            tracing::warn!("ADMIN_PASSWORD not set, using the development default");
            DEV_ADMIN_PASSWORD.to_string()
        }
    };
    let password_hash = password::hash_password(&plain)
        .map_err(|e| ServerError::Config(format!("Failed to hash ADMIN_PASSWORD: {e}")))?;

    Ok(AdminAccount {
        username,
        password_hash,
    })
}
