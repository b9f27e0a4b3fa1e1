//! Team and membership routes.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::{CreateTeamRequest, Team, TeamMembersRequest, UpdateTeamRequest, User};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AppJson, AppPath};

/// Create a team. The admin becomes its first member.
///
/// POST /teams
pub async fn create_team(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateTeamRequest>,
) -> Result<(StatusCode, Json<Team>), ApiError> {
    let team = state.teams.create_team(request).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

/// List all teams.
///
/// GET /teams
pub async fn list_teams(State(state): State<AppState>) -> Result<Json<Vec<Team>>, ApiError> {
    Ok(Json(state.teams.list_teams().await?))
}

/// Get a team.
///
/// GET /teams/:team_id
pub async fn get_team(
    State(state): State<AppState>,
    AppPath(team_id): AppPath<i64>,
) -> Result<Json<Team>, ApiError> {
    Ok(Json(state.teams.get_team(team_id).await?))
}

/// Update name, description and/or admin.
///
/// PUT /teams/:team_id
pub async fn update_team(
    State(state): State<AppState>,
    AppPath(team_id): AppPath<i64>,
    AppJson(request): AppJson<UpdateTeamRequest>,
) -> Result<Json<Team>, ApiError> {
    Ok(Json(state.teams.update_team(team_id, request).await?))
}

/// Add users to a team. Returns the resulting roster.
///
/// POST /teams/:team_id/users
pub async fn add_users(
    State(state): State<AppState>,
    AppPath(team_id): AppPath<i64>,
    AppJson(request): AppJson<TeamMembersRequest>,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.teams.add_users(team_id, request.users).await?))
}

/// Remove users from a team. Returns the resulting roster.
///
/// DELETE /teams/:team_id/users
pub async fn remove_users(
    State(state): State<AppState>,
    AppPath(team_id): AppPath<i64>,
    AppJson(request): AppJson<TeamMembersRequest>,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.teams.remove_users(team_id, request.users).await?))
}

/// Members of a team ordered by name.
///
/// GET /teams/:team_id/users
pub async fn list_team_users(
    State(state): State<AppState>,
    AppPath(team_id): AppPath<i64>,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.teams.list_team_users(team_id).await?))
}
