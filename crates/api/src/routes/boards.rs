//! Board routes.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::{Board, CreateBoardRequest, ExportArtifact};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AppJson, AppPath};

/// Create an open board for a team.
///
/// POST /teams/:team_id/boards
pub async fn create_board(
    State(state): State<AppState>,
    AppPath(team_id): AppPath<i64>,
    AppJson(request): AppJson<CreateBoardRequest>,
) -> Result<(StatusCode, Json<Board>), ApiError> {
    let board = state.boards.create_board(team_id, request).await?;
    Ok((StatusCode::CREATED, Json(board)))
}

/// Open boards of a team.
///
/// GET /teams/:team_id/boards
pub async fn list_open_boards(
    State(state): State<AppState>,
    AppPath(team_id): AppPath<i64>,
) -> Result<Json<Vec<Board>>, ApiError> {
    Ok(Json(state.boards.list_open_boards(team_id).await?))
}

/// Close a board once all its tasks are complete.
///
/// PUT /boards/:board_id/close
pub async fn close_board(
    State(state): State<AppState>,
    AppPath(board_id): AppPath<i64>,
) -> Result<Json<Board>, ApiError> {
    Ok(Json(state.boards.close_board(board_id).await?))
}

/// Write a text report of the board to the export directory.
///
/// POST /boards/:board_id/export
pub async fn export_board(
    State(state): State<AppState>,
    AppPath(board_id): AppPath<i64>,
) -> Result<Json<ExportArtifact>, ApiError> {
    Ok(Json(state.boards.export_board(board_id).await?))
}
