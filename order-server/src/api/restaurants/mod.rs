//! Restaurant API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Restaurant router - bearer token required for every route
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/restaurants", get(handler::list).post(handler::create))
        .route(
            "/api/restaurants/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
