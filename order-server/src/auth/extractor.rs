//! CurrentUser extractor
//!
//! Reuses the identity `require_auth` stored in the request extensions and
//! resolves the header itself only when the middleware did not run.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::AppError;

use crate::auth::CurrentUser;
use crate::core::ServerState;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());
        let user = state.resolver.resolve_header(header)?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
