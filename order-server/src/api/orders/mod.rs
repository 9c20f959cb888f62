//! Order API Module
//!
//! Every route requires a bearer token; what the caller may see or change is
//! decided by [`crate::orders::OrderService`].

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/orders", get(handler::list).post(handler::create))
        .route(
            "/api/orders/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
