//! Task repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::entities::{TaskEntity, TaskStatusDb, TaskWithAssigneeEntity};
use crate::metrics::QueryTimer;

/// Repository for task-related database operations.
#[derive(Clone)]
pub struct TaskRepository {
    pool: SqlitePool,
}

impl TaskRepository {
    /// Creates a new TaskRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new open task. The store rejects inserts on closed boards.
    pub async fn create(
        &self,
        board_id: i64,
        user_id: i64,
        title: &str,
        description: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> Result<TaskEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_task");
        let result = sqlx::query_as::<_, TaskEntity>(
            r#"
            INSERT INTO tasks (board_id, user_id, title, description, status, created_at)
            VALUES ($1, $2, $3, $4, 'OPEN', $5)
            RETURNING id, board_id, user_id, title, description, status, created_at
            "#,
        )
        .bind(board_id)
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a task by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<TaskEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_task_by_id");
        let result = sqlx::query_as::<_, TaskEntity>(
            r#"
            SELECT id, board_id, user_id, title, description, status, created_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check whether a board already has a task with this title.
    pub async fn title_exists_on_board(
        &self,
        board_id: i64,
        title: &str,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("task_title_exists_on_board");
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tasks WHERE board_id = $1 AND title = $2",
        )
        .bind(board_id)
        .bind(title)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(count? > 0)
    }

    /// Set a task's status. The store rejects backward transitions.
    pub async fn update_status(
        &self,
        id: i64,
        status: TaskStatusDb,
    ) -> Result<Option<TaskEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_task_status");
        let result = sqlx::query_as::<_, TaskEntity>(
            r#"
            UPDATE tasks
            SET status = $1
            WHERE id = $2
            RETURNING id, board_id, user_id, title, description, status, created_at
            "#,
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Tasks of a board with their assignee names, in creation order.
    pub async fn list_for_board_with_assignees(
        &self,
        board_id: i64,
    ) -> Result<Vec<TaskWithAssigneeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_tasks_for_board");
        let result = sqlx::query_as::<_, TaskWithAssigneeEntity>(
            r#"
            SELECT t.id, t.board_id, t.user_id, t.title, t.description, t.status, t.created_at,
                   u.name AS assignee_name
            FROM tasks t
            JOIN users u ON u.id = t.user_id
            WHERE t.board_id = $1
            ORDER BY t.created_at, t.id
            "#,
        )
        .bind(board_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
