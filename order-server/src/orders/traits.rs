//! Collaborator interfaces consumed by the order core

use rust_decimal::Decimal;
use uuid::Uuid;

use super::model::Order;
use crate::db::StorageResult;

/// Persisted orders
///
/// `update` and `delete` return `false` when no row has the given id.
/// `scan` yields every order in insertion order.
pub trait OrderStore: Send + Sync {
    fn insert(&self, order: &Order) -> StorageResult<()>;
    fn get(&self, id: Uuid) -> StorageResult<Option<Order>>;
    fn update(&self, order: &Order) -> StorageResult<bool>;
    fn delete(&self, id: Uuid) -> StorageResult<bool>;
    fn scan(&self) -> StorageResult<Vec<Order>>;
}

/// Existence oracle for restaurants
pub trait RestaurantDirectory: Send + Sync {
    fn restaurant_exists(&self, id: Uuid) -> StorageResult<bool>;
}

/// Catalog entry for one menu item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub unit_price: Decimal,
}

/// Menu price lookup
///
/// `None` means the catalog does not know the item.
pub trait PriceCatalog: Send + Sync {
    fn lookup(&self, item_id: &str) -> Option<CatalogEntry>;
}
