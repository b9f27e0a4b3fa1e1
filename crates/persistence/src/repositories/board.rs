//! Board repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::entities::BoardEntity;
use crate::metrics::QueryTimer;

/// Repository for board-related database operations.
#[derive(Clone)]
pub struct BoardRepository {
    pool: SqlitePool,
}

impl BoardRepository {
    /// Creates a new BoardRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new open board.
    pub async fn create(
        &self,
        team_id: i64,
        name: &str,
        description: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> Result<BoardEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_board");
        let result = sqlx::query_as::<_, BoardEntity>(
            r#"
            INSERT INTO boards (team_id, name, description, status, created_at)
            VALUES ($1, $2, $3, 'OPEN', $4)
            RETURNING id, team_id, name, description, status, created_at, closed_at
            "#,
        )
        .bind(team_id)
        .bind(name)
        .bind(description)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a board by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<BoardEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_board_by_id");
        let result = sqlx::query_as::<_, BoardEntity>(
            r#"
            SELECT id, team_id, name, description, status, created_at, closed_at
            FROM boards
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check whether a team already has a board with this name.
    pub async fn name_exists_in_team(&self, team_id: i64, name: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("board_name_exists_in_team");
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM boards WHERE team_id = $1 AND name = $2",
        )
        .bind(team_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(count? > 0)
    }

    /// Open boards of a team, oldest first.
    pub async fn list_open_for_team(&self, team_id: i64) -> Result<Vec<BoardEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_open_boards_for_team");
        let result = sqlx::query_as::<_, BoardEntity>(
            r#"
            SELECT id, team_id, name, description, status, created_at, closed_at
            FROM boards
            WHERE team_id = $1 AND status = 'OPEN'
            ORDER BY created_at, id
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Close a board if it is open and every task on it is complete.
    ///
    /// Returns `None` when no row qualified; the caller decides why.
    pub async fn close_board(
        &self,
        id: i64,
        closed_at: DateTime<Utc>,
    ) -> Result<Option<BoardEntity>, sqlx::Error> {
        let timer = QueryTimer::new("close_board");
        let result = sqlx::query_as::<_, BoardEntity>(
            r#"
            UPDATE boards
            SET status = 'CLOSED', closed_at = $2
            WHERE id = $1
              AND status = 'OPEN'
              AND NOT EXISTS (
                  SELECT 1 FROM tasks WHERE board_id = $1 AND status != 'COMPLETE'
              )
            RETURNING id, team_id, name, description, status, created_at, closed_at
            "#,
        )
        .bind(id)
        .bind(closed_at)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Number of tasks on a board that are not complete.
    pub async fn count_incomplete_tasks(&self, board_id: i64) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_incomplete_tasks");
        let result = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tasks WHERE board_id = $1 AND status != 'COMPLETE'",
        )
        .bind(board_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::BoardStatusDb;
    use crate::repositories::{test_support, TaskRepository, TeamRepository, UserRepository};

    struct Fixture {
        boards: BoardRepository,
        tasks: TaskRepository,
        team_id: i64,
        user_id: i64,
    }

    async fn setup() -> Fixture {
        let pool = test_support::pool().await;
        let user = UserRepository::new(pool.clone())
            .create("alice", "Alice", Utc::now())
            .await
            .unwrap();
        let team = TeamRepository::new(pool.clone())
            .create_team("eng", "", user.id, Utc::now())
            .await
            .unwrap();
        Fixture {
            boards: BoardRepository::new(pool.clone()),
            tasks: TaskRepository::new(pool),
            team_id: team.id,
            user_id: user.id,
        }
    }

    #[tokio::test]
    async fn test_board_names_unique_per_team() {
        let f = setup().await;
        f.boards
            .create(f.team_id, "sprint-1", None, Utc::now())
            .await
            .unwrap();

        assert!(f.boards.name_exists_in_team(f.team_id, "sprint-1").await.unwrap());
        let err = f
            .boards
            .create(f.team_id, "sprint-1", Some("again"), Utc::now())
            .await
            .unwrap_err();
        assert!(err.as_database_error().unwrap().is_unique_violation());
    }

    #[tokio::test]
    async fn test_close_board_requires_complete_tasks() {
        let f = setup().await;
        let board = f
            .boards
            .create(f.team_id, "sprint-1", None, Utc::now())
            .await
            .unwrap();
        let task = f
            .tasks
            .create(board.id, f.user_id, "fix-bug", None, Utc::now())
            .await
            .unwrap();

        assert!(f.boards.close_board(board.id, Utc::now()).await.unwrap().is_none());
        assert_eq!(f.boards.count_incomplete_tasks(board.id).await.unwrap(), 1);

        f.tasks
            .update_status(task.id, crate::entities::TaskStatusDb::Complete)
            .await
            .unwrap();

        let closed = f
            .boards
            .close_board(board.id, Utc::now())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(closed.status, BoardStatusDb::Closed);
        assert!(closed.closed_at.is_some());

        // Already closed.
        assert!(f.boards.close_board(board.id, Utc::now()).await.unwrap().is_none());
        assert!(f.boards.list_open_for_team(f.team_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_open_boards() {
        let f = setup().await;
        let first = f
            .boards
            .create(f.team_id, "a", None, Utc::now())
            .await
            .unwrap();
        let second = f
            .boards
            .create(f.team_id, "b", None, Utc::now())
            .await
            .unwrap();
        f.boards.close_board(first.id, Utc::now()).await.unwrap();

        let open = f.boards.list_open_for_team(f.team_id).await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, second.id);
    }

    #[tokio::test]
    async fn test_list_open_boards_by_creation_time() {
        let f = setup().await;
        let now = Utc::now();
        f.boards
            .create(f.team_id, "later", None, now)
            .await
            .unwrap();
        f.boards
            .create(f.team_id, "earlier", None, now - chrono::Duration::days(30))
            .await
            .unwrap();

        let open = f.boards.list_open_for_team(f.team_id).await.unwrap();
        let names: Vec<&str> = open.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["earlier", "later"]);
    }
}
