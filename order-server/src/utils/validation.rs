//! Input validation helpers
//!
//! Payload DTOs carry `validator` rules; handlers run them through
//! [`validate_payload`] before touching storage. Path and query ids are
//! parsed with [`parse_id`].

use shared::AppError;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

/// A path or query identifier that is not a UUID
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field}")]
pub struct InvalidId {
    pub field: &'static str,
}

impl From<InvalidId> for AppError {
    fn from(err: InvalidId) -> Self {
        AppError::invalid_request(err.to_string()).with_detail("field", err.field)
    }
}

/// Parse a UUID identifier named `field` (`orderId`, `restaurantId`, ...)
pub fn parse_id(raw: &str, field: &'static str) -> Result<Uuid, InvalidId> {
    Uuid::parse_str(raw.trim()).map_err(|_| InvalidId { field })
}

/// Parse an optional identifier; absent stays absent
pub fn parse_optional_id(
    raw: Option<&str>,
    field: &'static str,
) -> Result<Option<Uuid>, InvalidId> {
    raw.map(|value| parse_id(value, field)).transpose()
}

/// Run the payload's declarative rules
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "orderId"), Ok(id));

        let err = parse_id("not-a-uuid", "orderId").unwrap_err();
        assert_eq!(err.to_string(), "Invalid orderId");
        assert!(parse_id("", "restaurantId").is_err());
    }

    #[test]
    fn test_parse_optional_id() {
        assert_eq!(parse_optional_id(None, "userId"), Ok(None));
        assert!(parse_optional_id(Some("x"), "userId").is_err());
    }

    #[test]
    fn test_invalid_id_is_bad_request() {
        let err: AppError = InvalidId { field: "orderId" }.into();
        assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid orderId");
    }
}
