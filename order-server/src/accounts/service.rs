//! Registration, login and role management

use shared::models::{LoginRequest, LoginResponse, RegisterRequest, RoleAssignment, UserDto};
use shared::{AppError, AppResult, Role};
use std::sync::Arc;

use super::model::User;
use crate::auth::{CurrentUser, JwtService};
use crate::db::Storage;
use crate::security_log;
use crate::utils::validation::{parse_id, validate_payload};

#[derive(Clone)]
pub struct AccountService {
    storage: Storage,
    jwt: Arc<JwtService>,
}

impl AccountService {
    pub fn new(storage: Storage, jwt: Arc<JwtService>) -> Self {
        Self { storage, jwt }
    }

    /// New accounts always start as `CUSTOMER`
    pub fn register(&self, request: RegisterRequest) -> AppResult<UserDto> {
        validate_payload(&request)?;
        let user = self.create_user(
            &request.username,
            &request.email,
            &request.password,
            Role::Customer,
        )?;
        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user.to_dto())
    }

    pub fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        validate_payload(&request)?;

        let Some(user) = self.storage.find_user_by_username(&request.username)? else {
            security_log!("WARN", "login_failed", username = %request.username, reason = "unknown_user");
            return Err(AppError::invalid_credentials());
        };

        let verified = user.verify_password(&request.password).map_err(|e| {
            tracing::error!(user_id = %user.id, error = %e, "Stored password hash is unreadable");
            AppError::invalid_credentials()
        })?;
        if !verified {
            security_log!("WARN", "login_failed", username = %request.username, reason = "bad_password");
            return Err(AppError::invalid_credentials());
        }

        let token = self
            .jwt
            .generate_token(&user.id.to_string(), &user.username, &user.roles)
            .map_err(|e| AppError::internal(e.to_string()))?;

        security_log!("INFO", "login_success", user_id = %user.id, username = %user.username);
        Ok(LoginResponse {
            access_token: token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt.expires_in_seconds(),
            user: user.to_dto(),
        })
    }

    pub fn me(&self, current: &CurrentUser) -> AppResult<UserDto> {
        let id = current.id().ok_or_else(AppError::not_authenticated)?;
        self.storage
            .get_user(id)?
            .map(|user| user.to_dto())
            .ok_or_else(AppError::not_authenticated)
    }

    /// Replace a user's role set (admin only, enforced by the route layer)
    pub fn set_roles(
        &self,
        current: &CurrentUser,
        user_id: &str,
        assignment: RoleAssignment,
    ) -> AppResult<UserDto> {
        validate_payload(&assignment)?;
        let id = parse_id(user_id, "userId")?;
        let roles = Role::parse_all(&assignment.roles)
            .map_err(|e| AppError::invalid_request(e.to_string()))?;

        let user = self
            .storage
            .set_user_roles(id, roles)?
            .ok_or_else(|| AppError::not_found("User"))?;

        security_log!(
            "INFO",
            "roles_changed",
            user_id = %user.id,
            roles = ?user.roles,
            changed_by = ?current.id()
        );
        Ok(user.to_dto())
    }

    /// Create the configured administrator unless the username is taken
    ///
    /// Returns `true` when an account was created.
    pub fn ensure_admin(&self, username: &str, email: &str, password: &str) -> AppResult<bool> {
        if self.storage.find_user_by_username(username)?.is_some() {
            return Ok(false);
        }
        let user = self.create_user(username, email, password, Role::Admin)?;
        tracing::info!(user_id = %user.id, username = %user.username, "Bootstrap admin created");
        Ok(true)
    }

    fn create_user(&self, username: &str, email: &str, password: &str, role: Role) -> AppResult<User> {
        let hash =
            User::hash_password(password).map_err(|e| AppError::internal(e.to_string()))?;
        let user = User::new(username, email, hash, [role]);
        self.storage.insert_user(&user)?;
        Ok(user)
    }
}
