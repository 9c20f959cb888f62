//! Restaurant API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::AppResult;
use shared::models::{PageQuery, Restaurant, RestaurantCreate, RestaurantPage, RestaurantUpdate};

use crate::api::extract::ValidatedJson;
use crate::auth::CurrentUser;
use crate::core::ServerState;

/// List active restaurants (paginated, newest first)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<RestaurantPage>> {
    Ok(Json(state.restaurants.list(query)?))
}

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<RestaurantCreate>,
) -> AppResult<(StatusCode, Json<Restaurant>)> {
    let restaurant = state.restaurants.create(&user, payload)?;
    Ok((StatusCode::CREATED, Json(restaurant)))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Restaurant>> {
    Ok(Json(state.restaurants.get(&id)?))
}

pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<RestaurantUpdate>,
) -> AppResult<Json<Restaurant>> {
    Ok(Json(state.restaurants.update(&user, &id, payload)?))
}

pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.restaurants.delete(&user, &id)?;
    Ok(StatusCode::NO_CONTENT)
}
