//! Board and task service backed by SQLite, plus board export to disk.

use async_trait::async_trait;
use chrono::Utc;
use domain::models::{
    Board, BoardReport, BoardStatus, CreateBoardRequest, CreateTaskRequest, ExportArtifact, Task,
    TaskLine, TaskStatus,
};
use domain::services::{
    export_file_name, numbered_file_name, render_board_report, BoardService,
};
use domain::{DomainError, DomainResult};
use persistence::entities::BoardEntity;
use persistence::repositories::{BoardRepository, TaskRepository, TeamRepository, UserRepository};
use sqlx::SqlitePool;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::info;
use validator::Validate;

use super::StoreResultExt;

/// Upper bound on numbered variants tried when an export name is taken.
const MAX_EXPORT_NAME_ATTEMPTS: u32 = 100;
use crate::middleware::metrics::{
    record_board_closed, record_board_exported, record_task_status_change,
};

#[derive(Clone)]
pub struct SqlBoardService {
    boards: BoardRepository,
    tasks: TaskRepository,
    teams: TeamRepository,
    users: UserRepository,
    export_dir: PathBuf,
}

impl SqlBoardService {
    pub fn new(pool: SqlitePool, export_dir: PathBuf) -> Self {
        Self {
            boards: BoardRepository::new(pool.clone()),
            tasks: TaskRepository::new(pool.clone()),
            teams: TeamRepository::new(pool.clone()),
            users: UserRepository::new(pool),
            export_dir,
        }
    }

    async fn require_board(&self, id: i64) -> DomainResult<BoardEntity> {
        self.boards
            .find_by_id(id)
            .await
            .or_store_error()?
            .ok_or_else(|| DomainError::not_found(format!("Board {} not found", id)))
    }

    async fn require_team(&self, id: i64) -> DomainResult<()> {
        match self.teams.find_by_id(id).await.or_store_error()? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(format!("Team {} not found", id))),
        }
    }

    /// Explains why a conditional close matched no row.
    async fn close_failure(&self, board_id: i64) -> DomainError {
        let board = match self.require_board(board_id).await {
            Ok(board) => Board::from(board),
            Err(err) => return err,
        };
        if board.status == BoardStatus::Closed {
            return DomainError::invalid_operation(format!(
                "Board {} is already closed",
                board_id
            ));
        }
        match self.boards.count_incomplete_tasks(board_id).await.or_store_error() {
            Ok(count) => DomainError::invalid_operation(format!(
                "Cannot close board: {} task(s) are not complete",
                count
            )),
            Err(err) => err,
        }
    }

    /// Writes a new export file, never replacing an existing one. Returns the
    /// name actually used.
    async fn write_export(&self, file_name: &str, content: String) -> DomainResult<String> {
        tokio::fs::create_dir_all(&self.export_dir)
            .await
            .map_err(|e| {
                DomainError::Internal(format!(
                    "Failed to create export directory {}: {}",
                    self.export_dir.display(),
                    e
                ))
            })?;

        let mut attempt = 1;
        loop {
            let candidate = numbered_file_name(file_name, attempt);
            let path = self.export_dir.join(&candidate);
            let write_failed = |e: std::io::Error| {
                DomainError::Internal(format!("Failed to write export {}: {}", path.display(), e))
            };

            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(mut file) => {
                    file.write_all(content.as_bytes()).await.map_err(write_failed)?;
                    file.flush().await.map_err(write_failed)?;
                    return Ok(candidate);
                }
                Err(e)
                    if e.kind() == ErrorKind::AlreadyExists
                        && attempt < MAX_EXPORT_NAME_ATTEMPTS =>
                {
                    attempt += 1;
                }
                Err(e) => return Err(write_failed(e)),
            }
        }
    }
}

#[async_trait]
impl BoardService for SqlBoardService {
    async fn create_board(
        &self,
        team_id: i64,
        request: CreateBoardRequest,
    ) -> DomainResult<Board> {
        let request = request.normalized();
        request.validate()?;

        self.require_team(team_id).await?;

        let duplicate = format!(
            "Board name '{}' already exists for this team",
            request.name
        );
        if self
            .boards
            .name_exists_in_team(team_id, &request.name)
            .await
            .or_store_error()?
        {
            return Err(DomainError::DuplicateName(duplicate));
        }

        let board = self
            .boards
            .create(
                team_id,
                &request.name,
                request.description.as_deref(),
                request.creation_time.unwrap_or_else(Utc::now),
            )
            .await
            .or_duplicate(duplicate)?;

        info!(board_id = board.id, team_id, board_name = %board.name, "Board created");
        Ok(board.into())
    }

    async fn add_task(&self, board_id: i64, request: CreateTaskRequest) -> DomainResult<Task> {
        let request = request.normalized();
        request.validate()?;

        let board = Board::from(self.require_board(board_id).await?);
        if !board.status.accepts_tasks() {
            return Err(DomainError::invalid_operation(
                "Cannot add tasks to a closed board",
            ));
        }

        if self
            .users
            .find_by_id(request.user_id)
            .await
            .or_store_error()?
            .is_none()
        {
            return Err(DomainError::not_found(format!(
                "User {} not found",
                request.user_id
            )));
        }

        let duplicate = format!(
            "Task title '{}' already exists on this board",
            request.title
        );
        if self
            .tasks
            .title_exists_on_board(board_id, &request.title)
            .await
            .or_store_error()?
        {
            return Err(DomainError::DuplicateName(duplicate));
        }

        let task = self
            .tasks
            .create(
                board_id,
                request.user_id,
                &request.title,
                request.description.as_deref(),
                request.creation_time.unwrap_or_else(Utc::now),
            )
            .await
            .or_duplicate(duplicate)?;

        info!(
            task_id = task.id,
            board_id,
            user_id = task.user_id,
            "Task added"
        );
        Ok(task.into())
    }

    async fn update_task_status(&self, task_id: i64, status: &str) -> DomainResult<Task> {
        let next: TaskStatus = status.parse().map_err(DomainError::Validation)?;

        let task = Task::from(
            self.tasks
                .find_by_id(task_id)
                .await
                .or_store_error()?
                .ok_or_else(|| DomainError::not_found(format!("Task {} not found", task_id)))?,
        );

        if task.status == next {
            return Ok(task);
        }
        if !task.status.can_transition_to(next) {
            return Err(DomainError::invalid_operation(format!(
                "Task status cannot move from {} to {}",
                task.status, next
            )));
        }

        let updated = self
            .tasks
            .update_status(task_id, next.into())
            .await
            .or_store_error()?
            .ok_or_else(|| DomainError::not_found(format!("Task {} not found", task_id)))?;

        record_task_status_change(next.as_str());
        info!(
            task_id,
            from = %task.status,
            to = %next,
            "Task status updated"
        );
        Ok(updated.into())
    }

    async fn close_board(&self, board_id: i64) -> DomainResult<Board> {
        match self
            .boards
            .close_board(board_id, Utc::now())
            .await
            .or_store_error()?
        {
            Some(board) => {
                record_board_closed();
                info!(board_id, "Board closed");
                Ok(board.into())
            }
            None => Err(self.close_failure(board_id).await),
        }
    }

    async fn list_open_boards(&self, team_id: i64) -> DomainResult<Vec<Board>> {
        self.require_team(team_id).await?;
        let boards = self
            .boards
            .list_open_for_team(team_id)
            .await
            .or_store_error()?;
        Ok(boards.into_iter().map(Board::from).collect())
    }

    async fn export_board(&self, board_id: i64) -> DomainResult<ExportArtifact> {
        let board = Board::from(self.require_board(board_id).await?);

        let team = self
            .teams
            .find_by_id(board.team_id)
            .await
            .or_store_error()?
            .ok_or_else(|| DomainError::not_found(format!("Team {} not found", board.team_id)))?;

        let tasks: Vec<TaskLine> = self
            .tasks
            .list_for_board_with_assignees(board_id)
            .await
            .or_store_error()?
            .into_iter()
            .map(TaskLine::from)
            .collect();

        let generated_at = Utc::now();
        let file_name = export_file_name(&board, generated_at);
        let report = BoardReport {
            board,
            team_name: team.name,
            tasks,
        };
        let content = render_board_report(&report, generated_at);

        let out_file = self.write_export(&file_name, content).await?;

        record_board_exported();
        info!(
            board_id,
            tasks = report.tasks.len(),
            out_file = %out_file,
            "Board exported"
        );
        Ok(ExportArtifact { out_file })
    }
}
