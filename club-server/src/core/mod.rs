//! Core module - configuration, state and process errors
//!
//! # Structure
//!
//! - [`Config`] - server configuration
//! - [`ServerState`] - shared service handles
//! - [`Server`] - HTTP server
//! - [`ServerError`] - startup / process errors

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::{AdminAccount, Config};
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
