//! Board and task service contract.

use crate::error::DomainResult;
use crate::models::{Board, CreateBoardRequest, CreateTaskRequest, ExportArtifact, Task};

/// Operations on boards and the tasks they own.
#[async_trait::async_trait]
pub trait BoardService: Send + Sync {
    /// Create an OPEN board for a team.
    async fn create_board(&self, team_id: i64, request: CreateBoardRequest)
        -> DomainResult<Board>;

    /// Add an OPEN task to an OPEN board.
    async fn add_task(&self, board_id: i64, request: CreateTaskRequest) -> DomainResult<Task>;

    /// Move a task to a new status. `status` is the raw client value.
    async fn update_task_status(&self, task_id: i64, status: &str) -> DomainResult<Task>;

    /// Close a board whose tasks are all COMPLETE.
    async fn close_board(&self, board_id: i64) -> DomainResult<Board>;

    /// OPEN boards of a team ordered by creation.
    async fn list_open_boards(&self, team_id: i64) -> DomainResult<Vec<Board>>;

    /// Render the board report and persist it as a timestamped file.
    async fn export_board(&self, board_id: i64) -> DomainResult<ExportArtifact>;
}
