//! Board export snapshot and artifact models.

use serde::{Deserialize, Serialize};

use super::{Board, Task};

/// A task together with the name of its assignee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLine {
    pub task: Task,
    pub assignee_name: String,
}

/// Everything needed to render a board report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardReport {
    pub board: Board,
    pub team_name: String,
    pub tasks: Vec<TaskLine>,
}

/// Result of an export: the file name written under the export directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ExportArtifact {
    pub out_file: String,
}
