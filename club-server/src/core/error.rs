use thiserror::Error;

/// Process-level failures: startup, configuration, binding the listener
///
/// Request handlers never return this; they use [`crate::AppError`].
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<shared::error::AppError> for ServerError {
    fn from(err: shared::error::AppError) -> Self {
        use shared::error::ErrorCode;
        match err.code {
            ErrorCode::ConfigError => ServerError::Config(err.message),
            ErrorCode::DatabaseError => ServerError::Database(err.message),
            _ => ServerError::Internal(anyhow::anyhow!(err.message)),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
