//! User repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::entities::UserEntity;
use crate::metrics::QueryTimer;

/// Repository for user-related database operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create a new user.
    pub async fn create(
        &self,
        name: &str,
        display_name: &str,
        created_at: DateTime<Utc>,
    ) -> Result<UserEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_user");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (name, display_name, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, name, display_name, created_at
            "#,
        )
        .bind(name)
        .bind(display_name)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, name, display_name, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check whether a user name is already taken.
    pub async fn name_exists(&self, name: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("user_name_exists");
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE name = $1")
            .bind(name)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        Ok(count? > 0)
    }

    /// Update a user's display name. Returns `None` if the user does not exist.
    pub async fn update_display_name(
        &self,
        id: i64,
        display_name: &str,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_user_display_name");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            UPDATE users
            SET display_name = $1
            WHERE id = $2
            RETURNING id, name, display_name, created_at
            "#,
        )
        .bind(display_name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all users, oldest first.
    pub async fn list_all(&self) -> Result<Vec<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_users");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, name, display_name, created_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Return the subset of `ids` that belong to existing users.
    pub async fn find_existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let timer = QueryTimer::new("find_existing_user_ids");
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT id FROM users WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY id");

        let result = builder
            .build_query_scalar::<i64>()
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support;

    #[tokio::test]
    async fn test_create_and_find_user() {
        let repo = UserRepository::new(test_support::pool().await);
        let created = repo.create("alice", "Alice", Utc::now()).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.name, "alice");
        assert_eq!(found.display_name, "Alice");
        assert!(repo.find_by_id(created.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected_by_store() {
        let repo = UserRepository::new(test_support::pool().await);
        repo.create("alice", "Alice", Utc::now()).await.unwrap();

        let err = repo.create("alice", "Other", Utc::now()).await.unwrap_err();
        let db_err = err.as_database_error().unwrap();
        assert!(db_err.is_unique_violation());
        assert!(repo.name_exists("alice").await.unwrap());
        assert!(!repo.name_exists("bob").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_display_name() {
        let repo = UserRepository::new(test_support::pool().await);
        let user = repo.create("alice", "Alice", Utc::now()).await.unwrap();

        let updated = repo
            .update_display_name(user.id, "Alice Liddell")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.display_name, "Alice Liddell");
        assert!(repo.update_display_name(999, "x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_existing_ids() {
        let repo = UserRepository::new(test_support::pool().await);
        let a = repo.create("a", "A", Utc::now()).await.unwrap();
        let b = repo.create("b", "B", Utc::now()).await.unwrap();

        let existing = repo.find_existing_ids(&[b.id, 999, a.id]).await.unwrap();
        assert_eq!(existing, vec![a.id, b.id]);
        assert!(repo.find_existing_ids(&[]).await.unwrap().is_empty());
    }
}
