//! Order core error taxonomy

use shared::{AppError, ErrorCode};
use thiserror::Error;

use crate::db::StorageError;
use crate::utils::validation::InvalidId;

/// Failures of the order use cases
///
/// Each variant maps to one HTTP class: 401, 400, 404, 403, 500.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error(transparent)]
    InvalidArgument(#[from] InvalidInput),

    #[error("Order not found")]
    NotFound,

    #[error(transparent)]
    Forbidden(#[from] Denial),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Why a request payload or identifier was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("Order must contain at least one item")]
    EmptyItems,

    #[error("Invalid status")]
    Status,

    #[error("Invalid restaurantId")]
    UnknownRestaurant,

    #[error("Unknown menu item: {0}")]
    UnknownItem(String),

    #[error("{field} is out of range")]
    AmountOutOfRange { field: &'static str },

    #[error(transparent)]
    Id(#[from] InvalidId),

    #[error("{0}")]
    BadLine(&'static str),
}

/// Why an authenticated caller was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Denial {
    #[error("Forbidden")]
    NotVisible,

    #[error("Only pending orders can be updated")]
    NotEditable,
}

impl From<InvalidId> for OrderError {
    fn from(err: InvalidId) -> Self {
        OrderError::InvalidArgument(InvalidInput::Id(err))
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Unauthenticated => AppError::not_authenticated(),
            OrderError::InvalidArgument(input) => {
                let code = match &input {
                    InvalidInput::EmptyItems => ErrorCode::OrderEmpty,
                    InvalidInput::Status => ErrorCode::InvalidOrderStatus,
                    InvalidInput::UnknownRestaurant => ErrorCode::InvalidRestaurant,
                    InvalidInput::UnknownItem(_) => ErrorCode::MenuItemNotFound,
                    InvalidInput::AmountOutOfRange { .. } => ErrorCode::InvalidAmount,
                    InvalidInput::Id(_) | InvalidInput::BadLine(_) => ErrorCode::InvalidRequest,
                };
                let app_err = AppError::with_message(code, input.to_string());
                match input {
                    InvalidInput::Id(id) => app_err.with_detail("field", id.field),
                    InvalidInput::AmountOutOfRange { field } => app_err.with_detail("field", field),
                    _ => app_err,
                }
            }
            OrderError::NotFound => AppError::new(ErrorCode::OrderNotFound),
            OrderError::Forbidden(denial) => {
                let code = match denial {
                    Denial::NotVisible => ErrorCode::PermissionDenied,
                    Denial::NotEditable => ErrorCode::OrderNotEditable,
                };
                AppError::with_message(code, denial.to_string())
            }
            OrderError::Storage(e) => e.into(),
        }
    }
}

pub type OrderResult<T> = Result<T, OrderError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_http_mapping() {
        let cases = [
            (OrderError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (InvalidInput::EmptyItems.into(), StatusCode::BAD_REQUEST),
            (
                InvalidId { field: "orderId" }.into(),
                StatusCode::BAD_REQUEST,
            ),
            (OrderError::NotFound, StatusCode::NOT_FOUND),
            (Denial::NotVisible.into(), StatusCode::FORBIDDEN),
            (Denial::NotEditable.into(), StatusCode::FORBIDDEN),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).http_status(), status);
        }
    }

    #[test]
    fn test_specific_codes() {
        let cases: [(OrderError, ErrorCode); 8] = [
            (InvalidInput::EmptyItems.into(), ErrorCode::OrderEmpty),
            (InvalidInput::Status.into(), ErrorCode::InvalidOrderStatus),
            (InvalidInput::UnknownRestaurant.into(), ErrorCode::InvalidRestaurant),
            (
                InvalidInput::UnknownItem("x".into()).into(),
                ErrorCode::MenuItemNotFound,
            ),
            (
                InvalidInput::AmountOutOfRange { field: "unitPrice" }.into(),
                ErrorCode::InvalidAmount,
            ),
            (
                InvalidInput::BadLine("quantity must be at least 1").into(),
                ErrorCode::InvalidRequest,
            ),
            (Denial::NotVisible.into(), ErrorCode::PermissionDenied),
            (Denial::NotEditable.into(), ErrorCode::OrderNotEditable),
        ];
        for (err, code) in cases {
            assert_eq!(AppError::from(err).code, code);
        }
    }

    #[test]
    fn test_messages_follow_variants() {
        let err = AppError::from(OrderError::from(InvalidInput::UnknownItem("sushi".into())));
        assert_eq!(err.message, "Unknown menu item: sushi");

        let err = AppError::from(OrderError::from(InvalidId {
            field: "restaurantId",
        }));
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        assert_eq!(err.message, "Invalid restaurantId");
        assert_eq!(err.details.unwrap()["field"], "restaurantId");

        let err = AppError::from(OrderError::from(Denial::NotEditable));
        assert_eq!(err.message, "Only pending orders can be updated");
    }
}
