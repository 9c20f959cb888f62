//! Visibility and authorization rules
//!
//! Pure functions of `(Principal, Order)`; nothing here touches storage.
//!
//! | Operation | Rule |
//! |-----------|------|
//! | List | always allowed, result set filtered by [`ListFilter`] + visibility |
//! | Create | caller must carry a user id |
//! | Read / Delete | privileged, or the order's customer |
//! | Update | as Read, and non-privileged callers only while `pending` |

use shared::{OrderStatus, Principal};
use uuid::Uuid;

use super::error::{Denial, OrderError};
use super::model::Order;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Read,
    Update,
    Delete,
}

/// Whether the principal may see this particular order
pub fn can_view(principal: &Principal, order: &Order) -> bool {
    if principal.is_privileged() {
        return true;
    }
    match (principal.user_id(), order.customer_id()) {
        (Some(caller), Some(owner)) => caller == owner,
        _ => false,
    }
}

/// Gate one operation
///
/// `order` is the already-loaded target for Read/Update/Delete and `None`
/// for List/Create. Existence is checked by the caller first, so a missing
/// order is reported as not found before this gate runs.
pub fn authorize(
    principal: &Principal,
    operation: Operation,
    order: Option<&Order>,
) -> Result<(), OrderError> {
    match operation {
        Operation::List => Ok(()),
        Operation::Create => principal
            .user_id()
            .map(|_| ())
            .ok_or(OrderError::Unauthenticated),
        Operation::Read | Operation::Delete | Operation::Update => {
            let order = order.ok_or(OrderError::NotFound)?;
            if !can_view(principal, order) {
                return Err(Denial::NotVisible.into());
            }
            if operation == Operation::Update
                && !principal.is_privileged()
                && order.status() != OrderStatus::Pending
            {
                return Err(Denial::NotEditable.into());
            }
            Ok(())
        }
    }
}

/// Optional equality filters of a list request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub restaurant_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub status: Option<OrderStatus>,
}

impl ListFilter {
    /// Restaurant and status predicates, applied to every caller alike
    fn narrows(&self, order: &Order) -> bool {
        self.restaurant_id.is_none_or(|id| order.restaurant_id() == id)
            && self.status.is_none_or(|status| order.status() == status)
    }

    /// Customer predicate; only ever removes orders
    fn customer_matches(&self, order: &Order) -> bool {
        self.customer_id
            .is_none_or(|id| order.customer_id() == Some(id))
    }
}

/// Filter a candidate set down to what `principal` may list
///
/// Store order is preserved.
pub fn filter_visible(principal: &Principal, filter: &ListFilter, orders: Vec<Order>) -> Vec<Order> {
    orders
        .into_iter()
        .filter(|order| filter.narrows(order))
        .filter(|order| can_view(principal, order) && filter.customer_matches(order))
        .collect()
}
