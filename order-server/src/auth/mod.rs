//! Authentication
//!
//! - [`JwtService`] - JWT token service
//! - [`PrincipalResolver`] - token → caller identity
//! - [`CurrentUser`] - current caller (axum extractor)
//! - [`require_auth`] / [`require_admin`] - middleware

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod resolver;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
pub use resolver::{CurrentUser, PrincipalResolver};
