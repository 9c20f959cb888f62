//! User account model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::UserDto;
use shared::{Principal, Role};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Stored account
///
/// `password_hash` is a PHC string and never leaves the server; callers only
/// see [`UserDto`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub roles: BTreeSet<Role>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: String,
        roles: impl IntoIterator<Item = Role>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            password_hash,
            roles: roles.into_iter().collect(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    /// Identity used by the order rules
    pub fn principal(&self) -> Principal {
        Principal::user(self.id, self.roles.iter().copied())
    }

    pub fn to_dto(&self) -> UserDto {
        UserDto {
            id: self.id.to_string(),
            username: self.username.clone(),
            email: self.email.clone(),
            roles: self.roles.iter().copied().collect(),
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = User::hash_password("s3cret-pass").unwrap();
        assert!(hash.starts_with("$argon2"));

        let user = User::new("alice", "alice@example.com", hash, [Role::Customer]);
        assert!(user.verify_password("s3cret-pass").unwrap());
        assert!(!user.verify_password("wrong-pass").unwrap());
    }

    #[test]
    fn test_dto_hides_hash() {
        let user = User::new("bob", "bob@example.com", "x".to_string(), [Role::Admin]);
        let json = serde_json::to_string(&user.to_dto()).unwrap();
        assert!(!json.contains("password"));
        assert!(json.contains("\"roles\":[\"ADMIN\"]"));
    }

    #[test]
    fn test_principal_carries_roles() {
        let user = User::new(
            "carol",
            "carol@example.com",
            "x".to_string(),
            [Role::RestaurantOwner],
        );
        let principal = user.principal();
        assert_eq!(principal.user_id(), Some(user.id));
        assert!(principal.is_privileged());
        assert!(!principal.is_admin());
    }
}
