//! Price resolution for requested line items

use rust_decimal::Decimal;

use super::traits::{CatalogEntry, PriceCatalog};

/// Placeholder catalog until menu items are stored
///
/// Knows every item: the display name is the item id and the price is zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubCatalog;

impl PriceCatalog for StubCatalog {
    fn lookup(&self, item_id: &str) -> Option<CatalogEntry> {
        Some(CatalogEntry {
            name: item_id.to_string(),
            unit_price: Decimal::ZERO,
        })
    }
}
