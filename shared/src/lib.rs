//! Shared types for the order service
//!
//! Error codes, response envelopes and the wire models used by
//! `order-server` and its HTTP clients.

pub mod error;
pub mod models;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use models::{OrderStatus, Principal, Role, UnknownVariant};
pub use serde::{Deserialize, Serialize};
