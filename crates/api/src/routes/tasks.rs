//! Task routes.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::{CreateTaskRequest, Task, UpdateTaskStatusRequest};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AppJson, AppPath};

/// Add a task to an open board.
///
/// POST /boards/:board_id/tasks
pub async fn add_task(
    State(state): State<AppState>,
    AppPath(board_id): AppPath<i64>,
    AppJson(request): AppJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = state.boards.add_task(board_id, request).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Move a task to a new status.
///
/// PUT /tasks/:task_id/status
pub async fn update_task_status(
    State(state): State<AppState>,
    AppPath(task_id): AppPath<i64>,
    AppJson(request): AppJson<UpdateTaskStatusRequest>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(
        state
            .boards
            .update_task_status(task_id, &request.status)
            .await?,
    ))
}
