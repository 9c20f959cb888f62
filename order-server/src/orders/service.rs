//! Order use cases
//!
//! ```text
//! Principal → parse id → load (NotFound) → authorize (Forbidden)
//!           → lifecycle mutation (InvalidArgument) → store → OrderDto
//! ```

use chrono::Utc;
use shared::models::{OrderCreate, OrderDto, OrderListQuery, OrderUpdate};
use shared::{OrderStatus, Principal};
use std::sync::Arc;
use uuid::Uuid;

use super::error::{InvalidInput, OrderError, OrderResult};
use super::lifecycle::LifecycleManager;
use super::model::Order;
use super::traits::{OrderStore, PriceCatalog, RestaurantDirectory};
use super::visibility::{self, ListFilter, Operation};
use crate::security_log;
use crate::utils::validation::{parse_id, parse_optional_id};

#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn OrderStore>,
    lifecycle: LifecycleManager,
}

impl OrderService {
    pub fn new(
        store: Arc<dyn OrderStore>,
        restaurants: Arc<dyn RestaurantDirectory>,
        catalog: Arc<dyn PriceCatalog>,
    ) -> Self {
        Self {
            store,
            lifecycle: LifecycleManager::new(restaurants, catalog),
        }
    }

    pub fn create_order(
        &self,
        principal: &Principal,
        request: OrderCreate,
    ) -> OrderResult<OrderDto> {
        visibility::authorize(principal, Operation::Create, None)?;
        let customer_id = principal.user_id().ok_or(OrderError::Unauthenticated)?;

        let order = self.lifecycle.create(customer_id, request, Utc::now())?;
        self.store.insert(&order)?;

        tracing::info!(
            order_id = %order.id(),
            restaurant_id = %order.restaurant_id(),
            customer_id = %customer_id,
            total = %order.total_amount(),
            "Order created"
        );
        Ok(order.to_dto())
    }

    pub fn list_orders(
        &self,
        principal: &Principal,
        query: &OrderListQuery,
    ) -> OrderResult<Vec<OrderDto>> {
        visibility::authorize(principal, Operation::List, None)?;
        let filter = ListFilter {
            restaurant_id: parse_optional_id(query.restaurant_id.as_deref(), "restaurantId")?,
            customer_id: parse_optional_id(query.user_id.as_deref(), "userId")?,
            status: query
                .status
                .as_deref()
                .map(str::parse::<OrderStatus>)
                .transpose()
                .map_err(|_| InvalidInput::Status)?,
        };

        let candidates = self.store.scan()?;
        let visible = visibility::filter_visible(principal, &filter, candidates);
        tracing::debug!(count = visible.len(), "Orders listed");
        Ok(visible.iter().map(Order::to_dto).collect())
    }

    pub fn get_order(&self, principal: &Principal, order_id: &str) -> OrderResult<OrderDto> {
        let order = self.load_authorized(principal, order_id, Operation::Read)?;
        Ok(order.to_dto())
    }

    pub fn update_order(
        &self,
        principal: &Principal,
        order_id: &str,
        update: OrderUpdate,
    ) -> OrderResult<OrderDto> {
        let mut order = self.load_authorized(principal, order_id, Operation::Update)?;
        let previous_status = order.status();

        self.lifecycle.apply_update(&mut order, update, Utc::now())?;
        if !self.store.update(&order)? {
            return Err(OrderError::NotFound);
        }

        if order.status() != previous_status {
            tracing::info!(
                order_id = %order.id(),
                from = %previous_status,
                to = %order.status(),
                "Order status changed"
            );
        }
        Ok(order.to_dto())
    }

    pub fn delete_order(&self, principal: &Principal, order_id: &str) -> OrderResult<()> {
        let order = self.load_authorized(principal, order_id, Operation::Delete)?;
        if !self.store.delete(order.id())? {
            return Err(OrderError::NotFound);
        }
        tracing::info!(order_id = %order.id(), "Order deleted");
        Ok(())
    }

    /// Parse, load and gate; existence is decided before permission
    fn load_authorized(
        &self,
        principal: &Principal,
        order_id: &str,
        operation: Operation,
    ) -> OrderResult<Order> {
        let id: Uuid = parse_id(order_id, "orderId")?;
        let order = self
            .store
            .get(id)?
            .ok_or(OrderError::NotFound)?;

        if let Err(e) = visibility::authorize(principal, operation, Some(&order)) {
            security_log!(
                "WARN",
                "order_access_denied",
                order_id = %id,
                operation = ?operation,
                user_id = ?principal.user_id()
            );
            return Err(e);
        }
        Ok(order)
    }
}
