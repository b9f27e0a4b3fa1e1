//! User routes.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::{CreateUserRequest, Team, UpdateUserRequest, User};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AppJson, AppPath};

/// Create a user.
///
/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.users.create_user(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// List all users.
///
/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.users.list_users().await?))
}

/// Get a user.
///
/// GET /users/:user_id
pub async fn get_user(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i64>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users.get_user(user_id).await?))
}

/// Update a user's display name.
///
/// PUT /users/:user_id
pub async fn update_user(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i64>,
    AppJson(request): AppJson<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users.update_user(user_id, request).await?))
}

/// Teams the user belongs to.
///
/// GET /users/:user_id/teams
pub async fn get_user_teams(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i64>,
) -> Result<Json<Vec<Team>>, ApiError> {
    Ok(Json(state.users.get_user_teams(user_id).await?))
}
