//! Account rows
//!
//! Username and email uniqueness is enforced by the `usernames` and `emails`
//! index tables, written in the same transaction as the row.

use redb::{ReadableTable, ReadableTableMetadata};
use shared::Role;
use std::collections::BTreeSet;
use uuid::Uuid;

use super::{EMAILS_TABLE, Storage, StorageError, StorageResult, USERNAMES_TABLE, USERS_TABLE};
use crate::accounts::User;

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

impl Storage {
    pub fn insert_user(&self, user: &User) -> StorageResult<()> {
        let id = user.id.to_string();
        let email = email_key(&user.email);
        let value = serde_json::to_vec(user)?;

        let txn = self.begin_write()?;
        {
            let mut usernames = txn.open_table(USERNAMES_TABLE)?;
            if usernames.get(user.username.as_str())?.is_some() {
                return Err(StorageError::Duplicate {
                    table: "usernames",
                    key: user.username.clone(),
                });
            }
            let mut emails = txn.open_table(EMAILS_TABLE)?;
            if emails.get(email.as_str())?.is_some() {
                return Err(StorageError::Duplicate {
                    table: "emails",
                    key: email,
                });
            }

            usernames.insert(user.username.as_str(), id.as_str())?;
            emails.insert(email.as_str(), id.as_str())?;
            let mut users = txn.open_table(USERS_TABLE)?;
            users.insert(id.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    pub fn get_user(&self, id: Uuid) -> StorageResult<Option<User>> {
        let read_txn = self.begin_read()?;
        let users = read_txn.open_table(USERS_TABLE)?;
        match users.get(id.to_string().as_str())? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn find_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        let read_txn = self.begin_read()?;
        let usernames = read_txn.open_table(USERNAMES_TABLE)?;
        let Some(id) = usernames.get(username)?.map(|guard| guard.value().to_string()) else {
            return Ok(None);
        };

        let users = read_txn.open_table(USERS_TABLE)?;
        match users.get(id.as_str())? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Replace a user's role set; `None` when the user is unknown
    pub fn set_user_roles(&self, id: Uuid, roles: BTreeSet<Role>) -> StorageResult<Option<User>> {
        let key = id.to_string();
        let txn = self.begin_write()?;
        let updated = {
            let mut users = txn.open_table(USERS_TABLE)?;
            let current: Option<User> = match users.get(key.as_str())? {
                Some(value) => Some(serde_json::from_slice(value.value())?),
                None => None,
            };
            let Some(mut user) = current else {
                return Ok(None);
            };

            user.roles = roles;
            user.updated_at = chrono::Utc::now();
            let value = serde_json::to_vec(&user)?;
            users.insert(key.as_str(), value.as_slice())?;
            user
        };
        txn.commit()?;
        Ok(Some(updated))
    }

    pub fn count_users(&self) -> StorageResult<u64> {
        let read_txn = self.begin_read()?;
        let users = read_txn.open_table(USERS_TABLE)?;
        Ok(users.len()?)
    }
}
