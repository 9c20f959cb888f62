//! User / Account Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::UnknownVariant;

/// Role tag carried by a user account
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Customer,
    RestaurantOwner,
    Admin,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "CUSTOMER",
            Role::RestaurantOwner => "RESTAURANT_OWNER",
            Role::Admin => "ADMIN",
        }
    }

    /// ADMIN and RESTAURANT_OWNER see every order
    pub const fn is_privileged(&self) -> bool {
        matches!(self, Role::Admin | Role::RestaurantOwner)
    }

    /// Parse a list of role tokens, failing on the first unknown one
    pub fn parse_all<S: AsRef<str>>(tokens: &[S]) -> Result<BTreeSet<Role>, UnknownVariant> {
        tokens.iter().map(|t| t.as_ref().parse()).collect()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CUSTOMER" => Ok(Role::Customer),
            "RESTAURANT_OWNER" => Ok(Role::RestaurantOwner),
            "ADMIN" => Ok(Role::Admin),
            other => Err(UnknownVariant::new("role", other)),
        }
    }
}

/// Resolved identity of the caller for one request
///
/// Built once per inbound call and passed explicitly to every core operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    user_id: Option<Uuid>,
    roles: BTreeSet<Role>,
}

impl Principal {
    pub fn new(user_id: Option<Uuid>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            user_id,
            roles: roles.into_iter().collect(),
        }
    }

    /// Principal for a known user
    pub fn user(user_id: Uuid, roles: impl IntoIterator<Item = Role>) -> Self {
        Self::new(Some(user_id), roles)
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    pub fn is_privileged(&self) -> bool {
        self.roles.iter().any(Role::is_privileged)
    }
}

// =============================================================================
// Account API DTOs
// =============================================================================

/// Register request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email, length(max = 120))]
    pub email: String,
    #[validate(length(min = 8, max = 100))]
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom(function = "crate::models::not_blank"))]
    pub username: String,
    #[validate(custom(function = "crate::models::not_blank"))]
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: UserDto,
}

/// User information (never carries the password hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub email: String,
    pub roles: Vec<Role>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Replace a user's role set (raw tokens, parsed server-side)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RoleAssignment {
    #[validate(length(min = 1))]
    pub roles: Vec<String>,
}
