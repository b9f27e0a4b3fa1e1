//! Board domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::{non_blank, normalize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Lifecycle status of a board. CLOSED is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoardStatus {
    Open,
    Closed,
}

impl BoardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardStatus::Open => "OPEN",
            BoardStatus::Closed => "CLOSED",
        }
    }

    /// Returns true if tasks may still be added to the board.
    pub fn accepts_tasks(&self) -> bool {
        matches!(self, BoardStatus::Open)
    }
}

impl FromStr for BoardStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OPEN" => Ok(BoardStatus::Open),
            "CLOSED" => Ok(BoardStatus::Closed),
            _ => Err(format!("Invalid board status: {}", s)),
        }
    }
}

impl fmt::Display for BoardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A board owned by a team. Names are unique within the team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Board {
    pub id: i64,
    pub team_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: BoardStatus,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// Request payload for creating a board.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateBoardRequest {
    #[validate(length(
        min = 1,
        max = 64,
        message = "Board name must be between 1 and 64 characters"
    ))]
    pub name: String,

    #[validate(length(max = 128, message = "Description must be at most 128 characters"))]
    pub description: Option<String>,

    /// Optional explicit creation time; defaults to now.
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,
}

impl CreateBoardRequest {
    pub fn normalized(self) -> Self {
        Self {
            name: normalize(&self.name),
            description: non_blank(self.description),
            creation_time: self.creation_time,
        }
    }
}
