//! Order rows
//!
//! Rows live in `orders` keyed by an insertion sequence so a full scan
//! returns them in creation order; `order_index` maps ids to that key.

use redb::{ReadableTable, WriteTransaction};
use uuid::Uuid;

use super::{
    META_TABLE, ORDER_INDEX_TABLE, ORDER_SEQ_KEY, ORDERS_TABLE, Storage, StorageError,
    StorageResult,
};
use crate::orders::{Order, OrderStore};

impl Storage {
    fn next_order_seq(&self, txn: &WriteTransaction) -> StorageResult<u64> {
        let mut meta = txn.open_table(META_TABLE)?;
        let current = meta.get(ORDER_SEQ_KEY)?.map(|guard| guard.value()).unwrap_or(0);
        let next = current + 1;
        meta.insert(ORDER_SEQ_KEY, next)?;
        Ok(next)
    }
}

impl OrderStore for Storage {
    fn insert(&self, order: &Order) -> StorageResult<()> {
        let id = order.id().to_string();
        let value = serde_json::to_vec(order)?;

        let txn = self.begin_write()?;
        let seq = self.next_order_seq(&txn)?;
        {
            let mut index = txn.open_table(ORDER_INDEX_TABLE)?;
            if index.get(id.as_str())?.is_some() {
                return Err(StorageError::Duplicate {
                    table: "order_index",
                    key: id,
                });
            }
            index.insert(id.as_str(), seq)?;

            let mut orders = txn.open_table(ORDERS_TABLE)?;
            orders.insert(seq, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    fn get(&self, id: Uuid) -> StorageResult<Option<Order>> {
        let read_txn = self.begin_read()?;
        let index = read_txn.open_table(ORDER_INDEX_TABLE)?;
        let Some(seq) = index.get(id.to_string().as_str())?.map(|guard| guard.value()) else {
            return Ok(None);
        };

        let orders = read_txn.open_table(ORDERS_TABLE)?;
        match orders.get(seq)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    fn update(&self, order: &Order) -> StorageResult<bool> {
        let id = order.id().to_string();
        let value = serde_json::to_vec(order)?;

        let txn = self.begin_write()?;
        {
            let index = txn.open_table(ORDER_INDEX_TABLE)?;
            let Some(seq) = index.get(id.as_str())?.map(|guard| guard.value()) else {
                return Ok(false);
            };
            let mut orders = txn.open_table(ORDERS_TABLE)?;
            orders.insert(seq, value.as_slice())?;
        }
        txn.commit()?;
        Ok(true)
    }

    fn delete(&self, id: Uuid) -> StorageResult<bool> {
        let txn = self.begin_write()?;
        {
            let mut index = txn.open_table(ORDER_INDEX_TABLE)?;
            let Some(seq) = index
                .remove(id.to_string().as_str())?
                .map(|guard| guard.value())
            else {
                return Ok(false);
            };
            let mut orders = txn.open_table(ORDERS_TABLE)?;
            orders.remove(seq)?;
        }
        txn.commit()?;
        Ok(true)
    }

    fn scan(&self) -> StorageResult<Vec<Order>> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        let mut orders = Vec::new();
        for result in table.iter()? {
            let (_seq, value) = result?;
            orders.push(serde_json::from_slice(value.value())?);
        }
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::OrderItem;
    use rust_decimal::Decimal;
    use shared::OrderStatus;

    fn order(customer: Option<Uuid>) -> Order {
        Order::new(
            Uuid::new_v4(),
            customer,
            vec![OrderItem::new("item-1", "item-1", 2, Decimal::new(350, 2)).unwrap()],
            chrono::Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let storage = Storage::open_in_memory().unwrap();
        let o = order(Some(Uuid::new_v4()));
        storage.insert(&o).unwrap();

        let loaded = storage.get(o.id()).unwrap().unwrap();
        assert_eq!(loaded, o);
        assert!(storage.get(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_scan_preserves_insertion_order() {
        let storage = Storage::open_in_memory().unwrap();
        let ids: Vec<Uuid> = (0..5)
            .map(|_| {
                let o = order(None);
                storage.insert(&o).unwrap();
                o.id()
            })
            .collect();

        let scanned: Vec<Uuid> = storage.scan().unwrap().iter().map(Order::id).collect();
        assert_eq!(scanned, ids);
    }

    #[test]
    fn test_update_replaces_whole_row() {
        let storage = Storage::open_in_memory().unwrap();
        let mut o = order(None);
        storage.insert(&o).unwrap();

        o.set_status(OrderStatus::Ready);
        o.set_special_instructions("no onions".to_string());
        assert!(storage.update(&o).unwrap());

        let loaded = storage.get(o.id()).unwrap().unwrap();
        assert_eq!(loaded.status(), OrderStatus::Ready);
        assert_eq!(loaded.special_instructions(), Some("no onions"));
        assert_eq!(storage.scan().unwrap().len(), 1);
    }

    #[test]
    fn test_update_missing_returns_false() {
        let storage = Storage::open_in_memory().unwrap();
        assert!(!storage.update(&order(None)).unwrap());
        assert!(storage.scan().unwrap().is_empty());
    }

    #[test]
    fn test_delete() {
        let storage = Storage::open_in_memory().unwrap();
        let o = order(None);
        storage.insert(&o).unwrap();

        assert!(storage.delete(o.id()).unwrap());
        assert!(!storage.delete(o.id()).unwrap());
        assert!(storage.get(o.id()).unwrap().is_none());
        assert!(storage.scan().unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_insert_is_rejected_and_not_persisted() {
        let storage = Storage::open_in_memory().unwrap();
        let o = order(None);
        storage.insert(&o).unwrap();

        let err = storage.insert(&o).unwrap_err();
        assert!(matches!(err, StorageError::Duplicate { .. }));
        assert_eq!(storage.scan().unwrap().len(), 1);
    }
}
