//! Authentication Handlers
//!
//! Handles registration, login and the current-user endpoints

use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode};
use shared::models::{LoginRequest, LoginResponse, RegisterRequest, UserDto};
use shared::{ApiResponse, AppResult};

use crate::api::extract::ValidatedJson;
use crate::auth::CurrentUser;
use crate::core::ServerState;

/// Fixed delay for failed logins to slow down credential guessing
const AUTH_FAILURE_DELAY_MS: u64 = 250;

pub async fn register(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    let user = state.accounts.register(req)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Authenticates user credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    match state.accounts.login(req) {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tokio::time::sleep(Duration::from_millis(AUTH_FAILURE_DELAY_MS)).await;
            Err(e)
        }
    }
}

pub async fn me(State(state): State<ServerState>, user: CurrentUser) -> AppResult<Json<UserDto>> {
    Ok(Json(state.accounts.me(&user)?))
}

/// Tokens are stateless; logout only acknowledges
pub async fn logout(user: CurrentUser) -> Json<ApiResponse<()>> {
    tracing::info!(user_id = ?user.id(), username = %user.username, "User logged out");
    Json(ApiResponse::ok_with_message("Logged out"))
}
