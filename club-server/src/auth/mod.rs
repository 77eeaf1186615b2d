//! Admin capability gate
//!
//! - [`JwtService`] - token issue/validation
//! - [`CurrentAdmin`] - authenticated admin context
//! - [`require_admin`] - middleware for `/api/admin/*`
//! - [`password`] - argon2 hashing

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{ADMIN_ROLE, Claims, CurrentAdmin, IssuedToken, JwtConfig, JwtError, JwtService};
pub use middleware::require_admin;
