//! redb-based storage layer
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `orders` | `seq` | JSON `Order` | Order rows, key order = insertion order |
//! | `order_index` | `order_id` | `seq` | Lookup by id |
//! | `users` | `user_id` | JSON `User` | Accounts |
//! | `usernames` | `username` | `user_id` | Unique username index |
//! | `emails` | `email` | `user_id` | Unique email index |
//! | `restaurants` | `restaurant_id` | JSON `Restaurant` | Restaurants |
//! | `meta` | name | `u64` | Sequence counter |
//!
//! # Durability
//!
//! Every mutation runs in a single write transaction, so a row is either
//! fully committed or not written at all. Readers always observe the last
//! committed transaction.

pub mod orders;
pub mod restaurants;
pub mod users;

use redb::{
    Database, ReadTransaction, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction,
};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Order rows: key = insertion sequence, value = JSON-serialized Order
pub(crate) const ORDERS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("orders");

/// Order id index: key = order_id, value = sequence key in `orders`
pub(crate) const ORDER_INDEX_TABLE: TableDefinition<&str, u64> =
    TableDefinition::new("order_index");

/// Accounts: key = user_id, value = JSON-serialized User
pub(crate) const USERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

/// Unique usernames: key = username, value = user_id
pub(crate) const USERNAMES_TABLE: TableDefinition<&str, &str> = TableDefinition::new("usernames");

/// Unique emails: key = lower-cased email, value = user_id
pub(crate) const EMAILS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("emails");

/// Restaurants: key = restaurant_id, value = JSON-serialized Restaurant
pub(crate) const RESTAURANTS_TABLE: TableDefinition<&str, &[u8]> =
    TableDefinition::new("restaurants");

/// Counters: key = counter name, value = u64
pub(crate) const META_TABLE: TableDefinition<&str, u64> = TableDefinition::new("meta");

pub(crate) const ORDER_SEQ_KEY: &str = "order_seq";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Duplicate key in {table}: {key}")]
    Duplicate { table: &'static str, key: String },
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for shared::AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate { table: "usernames", .. } => shared::AppError::conflict(
                shared::ErrorCode::UsernameExists,
                "Username already exists",
            ),
            StorageError::Duplicate { table: "emails", .. } => {
                shared::AppError::conflict(shared::ErrorCode::EmailExists, "Email already exists")
            }
            StorageError::Duplicate { key, .. } => shared::AppError::conflict(
                shared::ErrorCode::AlreadyExists,
                format!("Already exists: {key}"),
            ),
            other => {
                tracing::error!(error = %other, "Storage error occurred");
                shared::AppError::database(other.to_string())
            }
        }
    }
}

/// Handle to the embedded database, cheap to clone
#[derive(Clone)]
pub struct Storage {
    db: Arc<Database>,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

impl Storage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (tests, ephemeral runs)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            // Create all tables if they don't exist
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(ORDER_INDEX_TABLE)?;
            let _ = write_txn.open_table(USERS_TABLE)?;
            let _ = write_txn.open_table(USERNAMES_TABLE)?;
            let _ = write_txn.open_table(EMAILS_TABLE)?;
            let _ = write_txn.open_table(RESTAURANTS_TABLE)?;

            let mut meta = write_txn.open_table(META_TABLE)?;
            if meta.get(ORDER_SEQ_KEY)?.is_none() {
                meta.insert(ORDER_SEQ_KEY, 0u64)?;
            }
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    pub(crate) fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    pub(crate) fn begin_read(&self) -> StorageResult<ReadTransaction> {
        Ok(self.db.begin_read()?)
    }

    /// Open a read transaction on the meta table (health check)
    pub fn ping(&self) -> StorageResult<()> {
        let read_txn = self.begin_read()?;
        read_txn.open_table(META_TABLE)?;
        Ok(())
    }
}
