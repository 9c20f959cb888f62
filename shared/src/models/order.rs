//! Order Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use super::UnknownVariant;

/// Order fulfillment status
///
/// Flat value space: any status may be assigned from any other.
/// Who may assign it is decided by the authorization layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariant;

    /// Exact, case-sensitive match on the wire token
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("status", s))
    }
}

/// Largest accepted unit price per line (1,000,000.00)
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 2);

/// Largest accepted quantity per line
pub const MAX_QUANTITY: i32 = 9999;

/// Round a money amount to two decimal places, keeping the scale at exactly two
///
/// `12.5` becomes `12.50`, so the string form always carries two places.
pub fn to_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp(2);
    rounded.rescale(2);
    rounded
}

// =============================================================================
// Request payloads
// =============================================================================

/// One requested line item
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    #[validate(custom(function = "crate::models::not_blank"))]
    pub item_id: String,
    #[validate(range(min = 1, max = 9999))]
    pub quantity: i32,
    /// Caller-supplied unit price; resolved from the price catalog when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "crate::models::unit_price_in_range"))]
    pub unit_price: Option<Decimal>,
}

impl OrderItemInput {
    pub fn new(item_id: impl Into<String>, quantity: i32) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
            unit_price: None,
        }
    }

    pub fn with_unit_price(mut self, unit_price: Decimal) -> Self {
        self.unit_price = Some(unit_price);
        self
    }
}

/// Create order payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub restaurant_id: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub customer_name: Option<String>,
    #[serde(default)]
    #[validate(email, length(max = 255))]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItemInput>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub special_instructions: Option<String>,
}

/// Update order payload
///
/// Every field is optional; `None` means "leave unchanged", never "clear".
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub customer_name: Option<String>,
    #[serde(default)]
    #[validate(email, length(max = 255))]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<OrderItemInput>>,
    /// Raw status token, parsed by the lifecycle layer
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub special_instructions: Option<String>,
}

/// List orders query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListQuery {
    #[serde(default)]
    pub restaurant_id: Option<String>,
    /// Customer filter; narrows visibility, never widens it
    #[serde(default, alias = "customerId")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

// =============================================================================
// Response projection
// =============================================================================

/// Order line as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub item_id: String,
    pub name: String,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
}

/// Order as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: String,
    pub restaurant_id: String,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub items: Vec<OrderItemDto>,
    pub status: OrderStatus,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal,
    pub special_instructions: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List response wrapper (`{ "data": [...] }`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderListResponse {
    pub data: Vec<OrderDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    #[test]
    fn test_status_parse_is_total() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
        let err = "PENDING".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err.kind, "status");
        assert!("shipped".parse::<OrderStatus>().is_err());
        assert!("".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Preparing).unwrap();
        assert_eq!(json, "\"preparing\"");
    }

    #[test]
    fn test_to_money_keeps_two_places() {
        assert_eq!(to_money(dec("12.5")).to_string(), "12.50");
        assert_eq!(to_money(Decimal::ZERO).to_string(), "0.00");
        assert_eq!(to_money(dec("3.14159")).to_string(), "3.14");
    }

    #[test]
    fn test_item_input_validation() {
        assert!(OrderItemInput::new("item-1", 2).validate().is_ok());
        assert!(OrderItemInput::new("item-1", 0).validate().is_err());
        assert!(OrderItemInput::new("   ", 1).validate().is_err());
        assert!(
            OrderItemInput::new("item-1", 1)
                .with_unit_price(dec("-0.01"))
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_item_input_upper_bounds() {
        assert!(OrderItemInput::new("item-1", MAX_QUANTITY).validate().is_ok());
        assert!(
            OrderItemInput::new("item-1", MAX_QUANTITY + 1)
                .validate()
                .is_err()
        );
        assert!(
            OrderItemInput::new("item-1", 1)
                .with_unit_price(MAX_UNIT_PRICE)
                .validate()
                .is_ok()
        );
        assert!(
            OrderItemInput::new("item-1", 1)
                .with_unit_price(dec("792281625142643375935439503.35"))
                .validate()
                .is_err()
        );
        assert_eq!(MAX_UNIT_PRICE.to_string(), "1000000.00");
    }

    #[test]
    fn test_create_validation() {
        let mut req = OrderCreate {
            restaurant_id: "r".to_string(),
            customer_email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_err());

        req.customer_email = Some("a@example.com".to_string());
        req.customer_name = Some(String::new());
        assert!(req.validate().is_err());

        req.customer_name = Some("Ada".to_string());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_item_input_accepts_numeric_price() {
        let item: OrderItemInput =
            serde_json::from_str(r#"{"itemId":"item-1","quantity":2,"unitPrice":4.25}"#).unwrap();
        assert_eq!(item.unit_price, Some(dec("4.25")));
    }

    #[test]
    fn test_list_query_accepts_customer_id_alias() {
        let q: OrderListQuery = serde_json::from_str(r#"{"customerId":"abc"}"#).unwrap();
        assert_eq!(q.user_id.as_deref(), Some("abc"));
    }
}
