//! User administration routes (ADMIN only)

mod handler;

use axum::{Router, middleware, routing::put};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/users/{id}/roles", put(handler::set_roles))
        .route_layer(middleware::from_fn(require_admin))
}
