//! Task entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{TaskLine, TaskStatus};
use sqlx::FromRow;

/// Task status as stored in the `tasks.status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatusDb {
    Open,
    InProgress,
    Complete,
}

impl From<TaskStatusDb> for TaskStatus {
    fn from(db_status: TaskStatusDb) -> Self {
        match db_status {
            TaskStatusDb::Open => TaskStatus::Open,
            TaskStatusDb::InProgress => TaskStatus::InProgress,
            TaskStatusDb::Complete => TaskStatus::Complete,
        }
    }
}

impl From<TaskStatus> for TaskStatusDb {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Open => TaskStatusDb::Open,
            TaskStatus::InProgress => TaskStatusDb::InProgress,
            TaskStatus::Complete => TaskStatusDb::Complete,
        }
    }
}

/// Database row mapping for the tasks table.
#[derive(Debug, Clone, FromRow)]
pub struct TaskEntity {
    pub id: i64,
    pub board_id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatusDb,
    pub created_at: DateTime<Utc>,
}

impl From<TaskEntity> for domain::models::Task {
    fn from(entity: TaskEntity) -> Self {
        Self {
            id: entity.id,
            board_id: entity.board_id,
            user_id: entity.user_id,
            title: entity.title,
            description: entity.description,
            status: entity.status.into(),
            created_at: entity.created_at,
        }
    }
}

/// Task row joined with the assignee's name, used for exports.
#[derive(Debug, Clone, FromRow)]
pub struct TaskWithAssigneeEntity {
    #[sqlx(flatten)]
    pub task: TaskEntity,
    pub assignee_name: String,
}

impl From<TaskWithAssigneeEntity> for TaskLine {
    fn from(entity: TaskWithAssigneeEntity) -> Self {
        Self {
            task: entity.task.into(),
            assignee_name: entity.assignee_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_round_trip() {
        for status in TaskStatus::ALL {
            let db: TaskStatusDb = status.into();
            assert_eq!(TaskStatus::from(db), status);
        }
    }

    #[test]
    fn test_task_line_conversion() {
        let line: TaskLine = TaskWithAssigneeEntity {
            task: TaskEntity {
                id: 4,
                board_id: 1,
                user_id: 2,
                title: "fix-bug".to_string(),
                description: Some("Broken login".to_string()),
                status: TaskStatusDb::InProgress,
                created_at: Utc::now(),
            },
            assignee_name: "alice".to_string(),
        }
        .into();

        assert_eq!(line.task.status, TaskStatus::InProgress);
        assert_eq!(line.assignee_name, "alice");
    }
}
