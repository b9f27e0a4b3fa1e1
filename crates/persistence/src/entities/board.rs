//! Board entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::BoardStatus;
use sqlx::FromRow;

/// Board status as stored in the `boards.status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoardStatusDb {
    Open,
    Closed,
}

impl From<BoardStatusDb> for BoardStatus {
    fn from(db_status: BoardStatusDb) -> Self {
        match db_status {
            BoardStatusDb::Open => BoardStatus::Open,
            BoardStatusDb::Closed => BoardStatus::Closed,
        }
    }
}

impl From<BoardStatus> for BoardStatusDb {
    fn from(status: BoardStatus) -> Self {
        match status {
            BoardStatus::Open => BoardStatusDb::Open,
            BoardStatus::Closed => BoardStatusDb::Closed,
        }
    }
}

/// Database row mapping for the boards table.
#[derive(Debug, Clone, FromRow)]
pub struct BoardEntity {
    pub id: i64,
    pub team_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: BoardStatusDb,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl From<BoardEntity> for domain::models::Board {
    fn from(entity: BoardEntity) -> Self {
        Self {
            id: entity.id,
            team_id: entity.team_id,
            name: entity.name,
            description: entity.description,
            status: entity.status.into(),
            created_at: entity.created_at,
            closed_at: entity.closed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_status_round_trip() {
        for status in [BoardStatus::Open, BoardStatus::Closed] {
            let db: BoardStatusDb = status.into();
            assert_eq!(BoardStatus::from(db), status);
        }
    }

    #[test]
    fn test_closed_board_entity_conversion() {
        let now = Utc::now();
        let board: domain::models::Board = BoardEntity {
            id: 1,
            team_id: 2,
            name: "sprint-1".to_string(),
            description: None,
            status: BoardStatusDb::Closed,
            created_at: now,
            closed_at: Some(now),
        }
        .into();

        assert_eq!(board.status, BoardStatus::Closed);
        assert_eq!(board.closed_at, Some(now));
    }
}
