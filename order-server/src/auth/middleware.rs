//! Authentication middleware
//!
//! Axum middleware for bearer authentication and admin checks

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::{AppError, ErrorCode};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::security_log;

/// API routes that skip authentication
const PUBLIC_API_ROUTES: &[&str] = &["/api/auth/login", "/api/auth/register"];

/// Require an authenticated caller
///
/// Resolves the caller from `Authorization: Bearer <token>` and
/// stores the [`CurrentUser`] in the request extensions.
///
/// # Skipped
///
/// - `OPTIONS *` (CORS preflight)
/// - paths outside `/api/` (`/health`, ...)
/// - `/api/auth/login`, `/api/auth/register`
///
/// # Errors
///
/// | Failure | Response |
/// |------|------------|
/// | No Authorization header | 401 NotAuthenticated |
/// | Expired token | 401 TokenExpired |
/// | Invalid token | 401 TokenInvalid |
/// | Unknown user | 401 NotAuthenticated |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path();
    if !path.starts_with("/api/") || PUBLIC_API_ROUTES.contains(&path) {
        return Ok(next.run(req).await);
    }

    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());
    if header.is_none() {
        security_log!("WARN", "auth_missing", uri = %req.uri());
    }

    let user = state.resolver.resolve_header(header)?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Require the ADMIN role
///
/// # Errors
///
/// Non-admins get 403 AdminRequired
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(AppError::not_authenticated)?;
    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = ?user.id(),
            username = %user.username
        );
        return Err(AppError::new(ErrorCode::AdminRequired));
    }

    Ok(next.run(req).await)
}
