//! Data models
//!
//! Shared between order-server and its clients (via API).
//! All IDs are UUID v4 and serialize as strings.

pub mod order;
pub mod restaurant;
pub mod user;

// Re-exports
pub use order::*;
pub use restaurant::*;
pub use user::*;

use rust_decimal::Decimal;
use thiserror::Error;

/// Returned by the `FromStr` impls of closed wire enums ([`OrderStatus`], [`Role`])
///
/// Parsing is total: any token outside the enum fails, nothing falls back to a default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {kind}: {token}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub token: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, token: impl Into<String>) -> Self {
        Self {
            kind,
            token: token.into(),
        }
    }
}

/// Rejects strings that are empty after trimming
pub(crate) fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

/// Rejects unit prices below zero or above [`MAX_UNIT_PRICE`]
pub(crate) fn unit_price_in_range(value: &Decimal) -> Result<(), validator::ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(validator::ValidationError::new("negative"));
    }
    if *value > MAX_UNIT_PRICE {
        return Err(validator::ValidationError::new("too_large"));
    }
    Ok(())
}
