use axum::{
    Json,
    extract::{Path, State},
};
use shared::AppResult;
use shared::models::{RoleAssignment, UserDto};

use crate::api::extract::ValidatedJson;
use crate::auth::CurrentUser;
use crate::core::ServerState;

/// Replace a user's role set
pub async fn set_roles(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    ValidatedJson(assignment): ValidatedJson<RoleAssignment>,
) -> AppResult<Json<UserDto>> {
    Ok(Json(state.accounts.set_roles(&user, &id, assignment)?))
}
