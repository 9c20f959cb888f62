//! Order lifecycle: creation and field mutation
//!
//! Every check runs before the first field is written, so a rejected
//! mutation leaves the order exactly as it was.

use chrono::{DateTime, Utc};
use shared::OrderStatus;
use shared::models::{MAX_QUANTITY, MAX_UNIT_PRICE, OrderCreate, OrderItemInput, OrderUpdate};
use std::sync::Arc;
use uuid::Uuid;

use super::error::{InvalidInput, OrderResult};
use super::model::{Order, OrderItem};
use super::traits::{PriceCatalog, RestaurantDirectory};
use crate::utils::validation::parse_id;

#[derive(Clone)]
pub struct LifecycleManager {
    restaurants: Arc<dyn RestaurantDirectory>,
    catalog: Arc<dyn PriceCatalog>,
}

impl LifecycleManager {
    pub fn new(restaurants: Arc<dyn RestaurantDirectory>, catalog: Arc<dyn PriceCatalog>) -> Self {
        Self {
            restaurants,
            catalog,
        }
    }

    /// Turn requested lines into priced order items
    ///
    /// A caller-supplied `unitPrice` wins over the catalog price; the display
    /// name always comes from the catalog. Quantity is capped at
    /// [`MAX_QUANTITY`] and the resolved price at [`MAX_UNIT_PRICE`].
    pub fn resolve_items(&self, inputs: Vec<OrderItemInput>) -> OrderResult<Vec<OrderItem>> {
        if inputs.is_empty() {
            return Err(InvalidInput::EmptyItems.into());
        }

        inputs
            .into_iter()
            .map(|input| -> OrderResult<OrderItem> {
                if input.item_id.trim().is_empty() {
                    return Err(InvalidInput::BadLine("itemId must not be blank").into());
                }
                if input.quantity < 1 {
                    return Err(InvalidInput::BadLine("quantity must be at least 1").into());
                }
                if input.quantity > MAX_QUANTITY {
                    return Err(InvalidInput::AmountOutOfRange { field: "quantity" }.into());
                }
                if input.unit_price.is_some_and(|p| p.is_sign_negative() && !p.is_zero()) {
                    return Err(InvalidInput::BadLine("unitPrice must not be negative").into());
                }

                let entry = self
                    .catalog
                    .lookup(&input.item_id)
                    .ok_or_else(|| InvalidInput::UnknownItem(input.item_id.clone()))?;
                let unit_price = input.unit_price.unwrap_or(entry.unit_price);
                if unit_price > MAX_UNIT_PRICE {
                    return Err(InvalidInput::AmountOutOfRange { field: "unitPrice" }.into());
                }

                OrderItem::new(input.item_id, entry.name, input.quantity, unit_price)
            })
            .collect()
    }

    /// Build a new `pending` order owned by `customer_id`
    pub fn create(
        &self,
        customer_id: Uuid,
        request: OrderCreate,
        now: DateTime<Utc>,
    ) -> OrderResult<Order> {
        let restaurant_id = parse_id(&request.restaurant_id, "restaurantId")?;
        if !self.restaurants.restaurant_exists(restaurant_id)? {
            return Err(InvalidInput::UnknownRestaurant.into());
        }

        let items = self.resolve_items(request.items)?;
        let mut order = Order::new(restaurant_id, Some(customer_id), items, now)?;

        if let Some(name) = request.customer_name {
            order.set_customer_name(name);
        }
        if let Some(email) = request.customer_email {
            order.set_customer_email(email);
        }
        if let Some(instructions) = request.special_instructions {
            order.set_special_instructions(instructions);
        }
        Ok(order)
    }

    /// Apply a partial update in place
    ///
    /// Absent fields are left untouched; `items` replaces the whole sequence.
    pub fn apply_update(
        &self,
        order: &mut Order,
        update: OrderUpdate,
        now: DateTime<Utc>,
    ) -> OrderResult<()> {
        let status = update
            .status
            .as_deref()
            .map(str::parse::<OrderStatus>)
            .transpose()
            .map_err(|_| InvalidInput::Status)?;
        let items = update
            .items
            .map(|items| self.resolve_items(items))
            .transpose()?;

        if let Some(items) = items {
            order.replace_items(items)?;
        }
        if let Some(name) = update.customer_name {
            order.set_customer_name(name);
        }
        if let Some(email) = update.customer_email {
            order.set_customer_email(email);
        }
        if let Some(instructions) = update.special_instructions {
            order.set_special_instructions(instructions);
        }
        if let Some(status) = status {
            order.set_status(status);
        }
        order.touch(now);
        Ok(())
    }
}
