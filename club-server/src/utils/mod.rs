//! Utilities
//!
//! - [`AppError`] / [`ApiResponse`] (from `shared::error`)
//! - logging, time zone, validation and clock helpers

pub mod clock;
pub mod logger;
pub mod time;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
