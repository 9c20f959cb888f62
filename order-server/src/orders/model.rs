//! Order aggregate
//!
//! Fields are private: `total_amount` is derived from `items` and only
//! changes through [`Order::replace_items`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::OrderStatus;
use shared::models::{OrderDto, OrderItemDto, to_money};
use uuid::Uuid;

use super::error::{InvalidInput, OrderError};

/// One resolved order line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    item_id: String,
    name: String,
    quantity: i32,
    unit_price: Decimal,
    subtotal: Decimal,
}

impl OrderItem {
    /// Build a line; the unit price is normalized to two places and the
    /// subtotal is `quantity * unit_price`
    ///
    /// Fails instead of overflowing when the product does not fit a `Decimal`.
    pub fn new(
        item_id: impl Into<String>,
        name: impl Into<String>,
        quantity: i32,
        unit_price: Decimal,
    ) -> Result<Self, OrderError> {
        let unit_price = to_money(unit_price);
        let subtotal = unit_price
            .checked_mul(Decimal::from(quantity))
            .ok_or(InvalidInput::AmountOutOfRange { field: "subtotal" })?;
        Ok(Self {
            item_id: item_id.into(),
            name: name.into(),
            quantity,
            unit_price,
            subtotal,
        })
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: Uuid,
    restaurant_id: Uuid,
    customer_id: Option<Uuid>,
    customer_name: Option<String>,
    customer_email: Option<String>,
    special_instructions: Option<String>,
    items: Vec<OrderItem>,
    status: OrderStatus,
    total_amount: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    /// New `pending` order with a fresh id
    ///
    /// Fails when `items` is empty.
    pub fn new(
        restaurant_id: Uuid,
        customer_id: Option<Uuid>,
        items: Vec<OrderItem>,
        now: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        let mut order = Self {
            id: Uuid::new_v4(),
            restaurant_id,
            customer_id,
            customer_name: None,
            customer_email: None,
            special_instructions: None,
            items: Vec::new(),
            status: OrderStatus::Pending,
            total_amount: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        };
        order.replace_items(items)?;
        Ok(order)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn restaurant_id(&self) -> Uuid {
        self.restaurant_id
    }

    pub fn customer_id(&self) -> Option<Uuid> {
        self.customer_id
    }

    pub fn customer_name(&self) -> Option<&str> {
        self.customer_name.as_deref()
    }

    pub fn customer_email(&self) -> Option<&str> {
        self.customer_email.as_deref()
    }

    pub fn special_instructions(&self) -> Option<&str> {
        self.special_instructions.as_deref()
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace the whole item sequence and recompute the total
    pub fn replace_items(&mut self, items: Vec<OrderItem>) -> Result<(), OrderError> {
        if items.is_empty() {
            return Err(InvalidInput::EmptyItems.into());
        }
        let total = items
            .iter()
            .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.subtotal))
            .ok_or(InvalidInput::AmountOutOfRange {
                field: "totalAmount",
            })?;
        self.total_amount = total;
        self.items = items;
        Ok(())
    }

    pub fn set_customer_name(&mut self, name: String) {
        self.customer_name = Some(name);
    }

    pub fn set_customer_email(&mut self, email: String) {
        self.customer_email = Some(email);
    }

    pub fn set_special_instructions(&mut self, instructions: String) {
        self.special_instructions = Some(instructions);
    }

    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    /// Refresh `updated_at`; never moves it backwards
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.updated_at);
    }

    /// Response projection
    pub fn to_dto(&self) -> OrderDto {
        OrderDto {
            id: self.id.to_string(),
            restaurant_id: self.restaurant_id.to_string(),
            customer_id: self.customer_id.map(|id| id.to_string()),
            customer_name: self.customer_name.clone(),
            customer_email: self.customer_email.clone(),
            items: self
                .items
                .iter()
                .map(|item| OrderItemDto {
                    item_id: item.item_id.clone(),
                    name: item.name.clone(),
                    quantity: item.quantity,
                    unit_price: to_money(item.unit_price),
                    subtotal: to_money(item.subtotal),
                })
                .collect(),
            status: self.status,
            total_amount: to_money(self.total_amount),
            special_instructions: self.special_instructions.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, qty: i32, cents: i64) -> OrderItem {
        OrderItem::new(id, id, qty, Decimal::new(cents, 2)).unwrap()
    }

    #[test]
    fn test_subtotal_and_total() {
        let order = Order::new(
            Uuid::new_v4(),
            None,
            vec![item("a", 2, 450), item("b", 3, 125)],
            Utc::now(),
        )
        .unwrap();

        assert_eq!(order.items()[0].subtotal(), Decimal::new(900, 2));
        assert_eq!(order.items()[1].subtotal(), Decimal::new(375, 2));
        assert_eq!(order.total_amount(), Decimal::new(1275, 2));
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.created_at(), order.updated_at());
    }

    #[test]
    fn test_empty_items_rejected() {
        let err = Order::new(Uuid::new_v4(), None, vec![], Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            OrderError::InvalidArgument(InvalidInput::EmptyItems)
        ));
    }

    #[test]
    fn test_replace_items_recomputes_total() {
        let mut order = Order::new(Uuid::new_v4(), None, vec![item("a", 1, 1000)], Utc::now())
            .unwrap();

        order.replace_items(vec![item("b", 4, 250)]).unwrap();
        assert_eq!(order.items().len(), 1);
        assert_eq!(order.total_amount(), Decimal::new(1000, 2));

        // a failed replacement leaves the previous lines in place
        assert!(order.replace_items(vec![]).is_err());
        assert_eq!(order.items()[0].item_id(), "b");
        assert_eq!(order.total_amount(), Decimal::new(1000, 2));
    }

    #[test]
    fn test_unit_price_normalized() {
        let line = OrderItem::new("a", "A", 3, Decimal::new(3333, 3)).unwrap();
        assert_eq!(line.unit_price().to_string(), "3.33");
        assert_eq!(line.subtotal().to_string(), "9.99");
    }

    #[test]
    fn test_overflowing_amounts_are_rejected() {
        let huge = Decimal::from_str_exact("792281625142643375935439503.35").unwrap();
        let err = OrderItem::new("a", "A", 1000, huge).unwrap_err();
        assert!(matches!(
            err,
            OrderError::InvalidArgument(InvalidInput::AmountOutOfRange { field: "subtotal" })
        ));

        // each line fits on its own, the sum does not
        let big = Decimal::from_str_exact("30000000000000000000000000000").unwrap();
        let lines = vec![
            OrderItem::new("a", "A", 1, big).unwrap(),
            OrderItem::new("b", "B", 1, big).unwrap(),
            OrderItem::new("c", "C", 1, big).unwrap(),
        ];
        let mut order =
            Order::new(Uuid::new_v4(), None, vec![item("z", 1, 100)], Utc::now()).unwrap();
        let err = order.replace_items(lines).unwrap_err();
        assert!(matches!(
            err,
            OrderError::InvalidArgument(InvalidInput::AmountOutOfRange {
                field: "totalAmount"
            })
        ));
        assert_eq!(order.total_amount(), Decimal::new(100, 2));
    }

    #[test]
    fn test_projection_shape() {
        let customer = Uuid::new_v4();
        let mut order = Order::new(
            Uuid::new_v4(),
            Some(customer),
            vec![item("item-1", 2, 0)],
            Utc::now(),
        )
        .unwrap();
        order.set_customer_name("Ada".to_string());

        let json = serde_json::to_value(order.to_dto()).unwrap();
        assert_eq!(json["customerId"], customer.to_string());
        assert_eq!(json["status"], "pending");
        assert_eq!(json["totalAmount"], "0.00");
        assert_eq!(json["items"][0]["itemId"], "item-1");
        assert_eq!(json["items"][0]["unitPrice"], "0.00");
        assert_eq!(json["customerName"], "Ada");
        assert!(json["id"].is_string());
    }
}
