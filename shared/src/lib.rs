//! Shared types for the club registration service
//!
//! Domain models, API DTOs and the unified error system used by
//! `club-server` and its clients.

pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
