//! Board export formatting.
//!
//! Renders a [`BoardReport`] into the plain-text report written by the
//! export endpoint, and derives the artifact file name.

use chrono::{DateTime, Utc};
use shared::time::{display_timestamp, file_timestamp};

use crate::models::{Board, BoardReport};

const HEAVY_RULE_WIDTH: usize = 60;
const LIGHT_RULE_WIDTH: usize = 40;
const NO_DESCRIPTION: &str = "No description";

/// Render the human-readable report for a board.
pub fn render_board_report(report: &BoardReport, generated_at: DateTime<Utc>) -> String {
    let heavy = "=".repeat(HEAVY_RULE_WIDTH);
    let board = &report.board;

    let mut lines: Vec<String> = vec![
        heavy.clone(),
        format!("BOARD EXPORT: {}", board.name),
        heavy.clone(),
        format!("Team: {}", report.team_name),
        format!("Description: {}", describe(board.description.as_deref())),
        format!("Status: {}", board.status),
        format!("Created: {}", display_timestamp(board.created_at)),
    ];
    if let Some(closed_at) = board.closed_at {
        lines.push(format!("Closed: {}", display_timestamp(closed_at)));
    }
    lines.push(String::new());

    if report.tasks.is_empty() {
        lines.push("No tasks in this board.".to_string());
    } else {
        lines.push("TASKS:".to_string());
        lines.push("-".repeat(LIGHT_RULE_WIDTH));

        for (index, line) in report.tasks.iter().enumerate() {
            let task = &line.task;
            lines.push(format!("{}. {}", index + 1, task.title));
            lines.push(format!("   Status: {}", task.status));
            lines.push(format!("   Assigned to: {}", line.assignee_name));
            lines.push(format!(
                "   Description: {}",
                describe(task.description.as_deref())
            ));
            lines.push(format!("   Created: {}", display_timestamp(task.created_at)));
            lines.push(String::new());
        }
    }

    lines.push(heavy);
    lines.push(format!(
        "Export generated on: {}",
        display_timestamp(generated_at)
    ));

    lines.join("\n")
}

/// File name for a board export taken at `at`.
///
/// Format: `board_<id>_<name>_<YYYYMMDDTHHMMSSZ>.txt`.
pub fn export_file_name(board: &Board, at: DateTime<Utc>) -> String {
    let name = sanitize_file_component(&board.name);
    if name.is_empty() {
        format!("board_{}_{}.txt", board.id, file_timestamp(at))
    } else {
        format!("board_{}_{}_{}.txt", board.id, name, file_timestamp(at))
    }
}

/// The `n`th candidate for an export file name; `n > 1` adds a `_<n>` suffix
/// before the extension.
pub fn numbered_file_name(file_name: &str, n: u32) -> String {
    if n <= 1 {
        return file_name.to_string();
    }
    match file_name.rsplit_once('.') {
        Some((stem, ext)) => format!("{}_{}.{}", stem, n, ext),
        None => format!("{}_{}", file_name, n),
    }
}

/// Keep alphanumerics, `-` and `_`; spaces become `_`; everything else is dropped.
fn sanitize_file_component(name: &str) -> String {
    name.trim()
        .chars()
        .filter_map(|c| match c {
            c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c),
            ' ' => Some('_'),
            _ => None,
        })
        .collect()
}

fn describe(description: Option<&str>) -> &str {
    match description {
        Some(d) if !d.is_empty() => d,
        _ => NO_DESCRIPTION,
    }
}
