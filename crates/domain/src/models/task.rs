//! Task domain models and the task status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::{non_blank, normalize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Status of a task. Transitions only move forward; COMPLETE is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Open,
    InProgress,
    Complete,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Open, TaskStatus::InProgress, TaskStatus::Complete];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Open => "OPEN",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Complete => "COMPLETE",
        }
    }

    /// Returns true if a task in this status may move to `next`.
    ///
    /// Forward moves may skip a step; staying put is allowed.
    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        next >= *self
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, TaskStatus::Complete)
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "OPEN" => Ok(TaskStatus::Open),
            "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "COMPLETE" => Ok(TaskStatus::Complete),
            _ => Err(format!(
                "Status must be one of: {}",
                TaskStatus::ALL
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A task on a board, always assigned to exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Task {
    pub id: i64,
    pub board_id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

/// Request payload for adding a task to a board.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateTaskRequest {
    #[validate(length(
        min = 1,
        max = 64,
        message = "Task title must be between 1 and 64 characters"
    ))]
    pub title: String,

    #[validate(length(max = 128, message = "Description must be at most 128 characters"))]
    pub description: Option<String>,

    #[serde(alias = "assignee_id")]
    #[validate(range(min = 1, message = "Assignee must be a valid user id"))]
    pub user_id: i64,

    /// Optional explicit creation time; defaults to now.
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    pub fn normalized(self) -> Self {
        Self {
            title: normalize(&self.title),
            description: non_blank(self.description),
            user_id: self.user_id,
            creation_time: self.creation_time,
        }
    }
}

/// Request payload for a status change. Parsed by the service so that an
/// unknown value surfaces as a validation error.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskStatusRequest {
    pub status: String,
}
