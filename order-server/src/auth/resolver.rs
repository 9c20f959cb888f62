//! Principal resolution
//!
//! ```text
//! Authorization: Bearer <jwt> → verify → load user by `sub` → CurrentUser
//! ```
//!
//! Roles come from the stored account, not from the token, so a role change
//! takes effect on the caller's next request.

use shared::{AppError, Principal};
use std::sync::Arc;
use uuid::Uuid;

use super::jwt::{JwtError, JwtService};
use crate::db::Storage;
use crate::security_log;

/// Caller of the current request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub principal: Principal,
    pub username: String,
}

impl CurrentUser {
    pub fn id(&self) -> Option<Uuid> {
        self.principal.user_id()
    }

    pub fn is_admin(&self) -> bool {
        self.principal.is_admin()
    }
}

#[derive(Clone)]
pub struct PrincipalResolver {
    jwt: Arc<JwtService>,
    storage: Storage,
}

impl PrincipalResolver {
    pub fn new(jwt: Arc<JwtService>, storage: Storage) -> Self {
        Self { jwt, storage }
    }

    /// Resolve the raw `Authorization` header value
    ///
    /// Every failure is an authentication failure (401).
    pub fn resolve_header(&self, header: Option<&str>) -> Result<CurrentUser, AppError> {
        let Some(header) = header else {
            return Err(AppError::not_authenticated());
        };
        let token = JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?;
        self.resolve_token(token)
    }

    pub fn resolve_token(&self, token: &str) -> Result<CurrentUser, AppError> {
        let claims = self.jwt.validate_token(token).map_err(|e| {
            security_log!("WARN", "auth_failed", error = %e);
            match e {
                JwtError::ExpiredToken => AppError::token_expired(),
                _ => AppError::invalid_token("Invalid token"),
            }
        })?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::invalid_token("Malformed token subject"))?;

        let Some(user) = self.storage.get_user(user_id)? else {
            security_log!("WARN", "auth_unknown_user", user_id = %user_id);
            return Err(AppError::not_authenticated());
        };

        Ok(CurrentUser {
            principal: user.principal(),
            username: user.username,
        })
    }
}
