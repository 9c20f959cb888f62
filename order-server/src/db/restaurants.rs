//! Restaurant rows

use redb::{ReadableTable, ReadableTableMetadata};
use shared::models::Restaurant;
use uuid::Uuid;

use super::{RESTAURANTS_TABLE, Storage, StorageError, StorageResult};
use crate::orders::RestaurantDirectory;

impl Storage {
    pub fn insert_restaurant(&self, restaurant: &Restaurant) -> StorageResult<()> {
        let key = restaurant.id.to_string();
        let value = serde_json::to_vec(restaurant)?;

        let txn = self.begin_write()?;
        {
            let mut table = txn.open_table(RESTAURANTS_TABLE)?;
            if table.get(key.as_str())?.is_some() {
                return Err(StorageError::Duplicate {
                    table: "restaurants",
                    key,
                });
            }
            table.insert(key.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    pub fn get_restaurant(&self, id: Uuid) -> StorageResult<Option<Restaurant>> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(RESTAURANTS_TABLE)?;
        match table.get(id.to_string().as_str())? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Replace an existing row; `false` when the id is unknown
    pub fn update_restaurant(&self, restaurant: &Restaurant) -> StorageResult<bool> {
        let key = restaurant.id.to_string();
        let value = serde_json::to_vec(restaurant)?;

        let txn = self.begin_write()?;
        {
            let mut table = txn.open_table(RESTAURANTS_TABLE)?;
            if table.get(key.as_str())?.is_none() {
                return Ok(false);
            }
            table.insert(key.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(true)
    }

    pub fn delete_restaurant(&self, id: Uuid) -> StorageResult<bool> {
        let txn = self.begin_write()?;
        let removed = {
            let mut table = txn.open_table(RESTAURANTS_TABLE)?;
            table.remove(id.to_string().as_str())?.is_some()
        };
        txn.commit()?;
        Ok(removed)
    }

    fn active_restaurants(&self) -> StorageResult<Vec<Restaurant>> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(RESTAURANTS_TABLE)?;
        let mut restaurants = Vec::with_capacity(table.len()? as usize);
        for entry in table.iter()? {
            let (_, value) = entry?;
            let restaurant: Restaurant = serde_json::from_slice(value.value())?;
            if restaurant.is_active {
                restaurants.push(restaurant);
            }
        }
        Ok(restaurants)
    }

    pub fn count_active_restaurants(&self) -> StorageResult<u64> {
        Ok(self.active_restaurants()?.len() as u64)
    }

    /// One page of active restaurants, newest first
    ///
    /// Returns the page content and the total number of active restaurants.
    pub fn list_active_restaurants(
        &self,
        page: usize,
        size: usize,
    ) -> StorageResult<(Vec<Restaurant>, u64)> {
        let mut restaurants = self.active_restaurants()?;
        let total = restaurants.len() as u64;
        restaurants.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let content = restaurants
            .into_iter()
            .skip(page.saturating_mul(size))
            .take(size)
            .collect();
        Ok((content, total))
    }
}

impl RestaurantDirectory for Storage {
    fn restaurant_exists(&self, id: Uuid) -> StorageResult<bool> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(RESTAURANTS_TABLE)?;
        Ok(table.get(id.to_string().as_str())?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use shared::models::RestaurantCreate;

    fn restaurant(name: &str, minutes_ago: i64) -> Restaurant {
        let mut r = Restaurant::new(
            Uuid::new_v4(),
            RestaurantCreate {
                name: name.to_string(),
                address: "1 Street".to_string(),
                ..Default::default()
            },
        );
        r.created_at -= Duration::minutes(minutes_ago);
        r
    }

    #[test]
    fn test_insert_get_exists() {
        let storage = Storage::open_in_memory().unwrap();
        let r = restaurant("A", 0);
        storage.insert_restaurant(&r).unwrap();

        assert_eq!(storage.get_restaurant(r.id).unwrap(), Some(r.clone()));
        assert!(storage.restaurant_exists(r.id).unwrap());
        assert!(!storage.restaurant_exists(Uuid::new_v4()).unwrap());
        assert!(matches!(
            storage.insert_restaurant(&r),
            Err(StorageError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_update_and_delete() {
        let storage = Storage::open_in_memory().unwrap();
        let mut r = restaurant("A", 0);
        assert!(!storage.update_restaurant(&r).unwrap());

        storage.insert_restaurant(&r).unwrap();
        r.name = "B".to_string();
        assert!(storage.update_restaurant(&r).unwrap());
        assert_eq!(storage.get_restaurant(r.id).unwrap().unwrap().name, "B");

        assert!(storage.delete_restaurant(r.id).unwrap());
        assert!(!storage.delete_restaurant(r.id).unwrap());
        assert!(storage.get_restaurant(r.id).unwrap().is_none());
    }

    #[test]
    fn test_list_active_newest_first() {
        let storage = Storage::open_in_memory().unwrap();
        let old = restaurant("old", 30);
        let mid = restaurant("mid", 20);
        let new = restaurant("new", 10);
        let mut closed = restaurant("closed", 0);
        closed.is_active = false;
        for r in [&mid, &old, &closed, &new] {
            storage.insert_restaurant(r).unwrap();
        }

        let (page, total) = storage.list_active_restaurants(0, 2).unwrap();
        assert_eq!(total, 3);
        let names: Vec<&str> = page.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["new", "mid"]);

        let (page, _) = storage.list_active_restaurants(1, 2).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "old");

        let (page, _) = storage.list_active_restaurants(5, 2).unwrap();
        assert!(page.is_empty());

        // inactive rows still exist for the order oracle
        assert!(storage.restaurant_exists(closed.id).unwrap());
    }
}
