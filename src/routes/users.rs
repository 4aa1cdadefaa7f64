//! User lookup routes

use crate::error::ApiResult;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use super::auth::UserResponse;

/// Create user lookup routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/:id", get(get_user))
}

/// Query parameters for listing users by email
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub email: String,
}

/// Fetch a single user by id
///
/// GET /api/v1/users/:id
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.users().find_by_id(id).await?;
    Ok(Json(user.into()))
}

/// List users registered under an email
///
/// GET /api/v1/users?email=user@example.com
async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state.users().find_by_email(&query.email).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
