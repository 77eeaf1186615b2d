//! Application services
//!
//! - [`catalog_service`] - club CRUD and rosters

pub mod catalog_service;

pub use catalog_service::CatalogService;
