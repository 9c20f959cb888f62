//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::AppResult;
use shared::models::{OrderCreate, OrderDto, OrderListQuery, OrderListResponse, OrderUpdate};

use crate::api::extract::ValidatedJson;
use crate::auth::CurrentUser;
use crate::core::ServerState;

/// List visible orders (`{ "data": [...] }`)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<OrderListResponse>> {
    let data = state.orders.list_orders(&user.principal, &query)?;
    Ok(Json(OrderListResponse { data }))
}

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<OrderCreate>,
) -> AppResult<(StatusCode, Json<OrderDto>)> {
    let order = state.orders.create_order(&user.principal, payload)?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<OrderDto>> {
    Ok(Json(state.orders.get_order(&user.principal, &id)?))
}

pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<OrderUpdate>,
) -> AppResult<Json<OrderDto>> {
    Ok(Json(state.orders.update_order(&user.principal, &id, payload)?))
}

pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.orders.delete_order(&user.principal, &id)?;
    Ok(StatusCode::NO_CONTENT)
}
