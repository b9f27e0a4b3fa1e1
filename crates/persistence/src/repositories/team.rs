//! Team repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::entities::{TeamEntity, UserEntity};
use crate::metrics::QueryTimer;

/// Repository for team and membership database operations.
#[derive(Clone)]
pub struct TeamRepository {
    pool: SqlitePool,
}

impl TeamRepository {
    /// Creates a new TeamRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new team and add its admin as the first member.
    pub async fn create_team(
        &self,
        name: &str,
        description: &str,
        admin_id: i64,
        created_at: DateTime<Utc>,
    ) -> Result<TeamEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_team");

        let mut tx = self.pool.begin().await?;

        let team = sqlx::query_as::<_, TeamEntity>(
            r#"
            INSERT INTO teams (name, description, admin_id, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, admin_id, created_at
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(admin_id)
        .bind(created_at)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO team_members (team_id, user_id, joined_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(team.id)
        .bind(admin_id)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(team)
    }

    /// Find a team by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<TeamEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_team_by_id");
        let result = sqlx::query_as::<_, TeamEntity>(
            r#"
            SELECT id, name, description, admin_id, created_at
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all teams, oldest first.
    pub async fn list_all(&self) -> Result<Vec<TeamEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_teams");
        let result = sqlx::query_as::<_, TeamEntity>(
            r#"
            SELECT id, name, description, admin_id, created_at
            FROM teams
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check whether a team name is taken by a team other than `exclude_id`.
    pub async fn name_exists(
        &self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("team_name_exists");
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM teams
            WHERE name = $1 AND ($2 IS NULL OR id != $2)
            "#,
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(count? > 0)
    }

    /// List the teams a user belongs to.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<TeamEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_teams_for_user");
        let result = sqlx::query_as::<_, TeamEntity>(
            r#"
            SELECT t.id, t.name, t.description, t.admin_id, t.created_at
            FROM teams t
            JOIN team_members m ON m.team_id = t.id
            WHERE m.user_id = $1
            ORDER BY t.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Apply a partial update. A new admin is added to the roster in the same
    /// transaction; the previous admin stays a member.
    pub async fn update_team(
        &self,
        id: i64,
        name: Option<&str>,
        description: Option<&str>,
        admin_id: Option<i64>,
        at: DateTime<Utc>,
    ) -> Result<Option<TeamEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_team");

        let mut tx = self.pool.begin().await?;

        if let Some(admin_id) = admin_id {
            sqlx::query(
                r#"
                INSERT OR IGNORE INTO team_members (team_id, user_id, joined_at)
                SELECT id, $2, $3 FROM teams WHERE id = $1
                "#,
            )
            .bind(id)
            .bind(admin_id)
            .bind(at)
            .execute(&mut *tx)
            .await?;
        }

        let team = sqlx::query_as::<_, TeamEntity>(
            r#"
            UPDATE teams
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                admin_id = COALESCE($4, admin_id)
            WHERE id = $1
            RETURNING id, name, description, admin_id, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(admin_id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(team)
    }

    /// Number of members on a team.
    pub async fn count_members(&self, team_id: i64) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_team_members");
        let result =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM team_members WHERE team_id = $1")
                .bind(team_id)
                .fetch_one(&self.pool)
                .await;
        timer.record();
        result
    }

    /// IDs of all members of a team.
    pub async fn member_ids(&self, team_id: i64) -> Result<Vec<i64>, sqlx::Error> {
        let timer = QueryTimer::new("list_team_member_ids");
        let result = sqlx::query_scalar::<_, i64>(
            "SELECT user_id FROM team_members WHERE team_id = $1 ORDER BY user_id",
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check whether a user is on a team.
    pub async fn is_member(&self, team_id: i64, user_id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("is_team_member");
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM team_members WHERE team_id = $1 AND user_id = $2",
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(count? > 0)
    }

    /// Add users to a team atomically. Existing members are left untouched;
    /// the store rejects the whole batch if it would exceed the member limit.
    pub async fn add_members(
        &self,
        team_id: i64,
        user_ids: &[i64],
        joined_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("add_team_members");

        let mut tx = self.pool.begin().await?;
        for user_id in user_ids {
            sqlx::query(
                r#"
                INSERT OR IGNORE INTO team_members (team_id, user_id, joined_at)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(team_id)
            .bind(user_id)
            .bind(joined_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        timer.record();
        Ok(())
    }

    /// Remove users from a team. Non-members are ignored.
    pub async fn remove_members(&self, team_id: i64, user_ids: &[i64]) -> Result<u64, sqlx::Error> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        let timer = QueryTimer::new("remove_team_members");
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("DELETE FROM team_members WHERE team_id = ");
        builder.push_bind(team_id);
        builder.push(" AND user_id IN (");
        let mut separated = builder.separated(", ");
        for id in user_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let result = builder.build().execute(&self.pool).await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// Members of a team ordered by user name.
    pub async fn list_members(&self, team_id: i64) -> Result<Vec<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_team_members");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT u.id, u.name, u.display_name, u.created_at
            FROM users u
            JOIN team_members m ON m.user_id = u.id
            WHERE m.team_id = $1
            ORDER BY u.name
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
