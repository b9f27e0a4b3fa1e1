//! User service backed by SQLite.

use async_trait::async_trait;
use chrono::Utc;
use domain::models::{CreateUserRequest, Team, UpdateUserRequest, User};
use domain::services::UserService;
use domain::{DomainError, DomainResult};
use persistence::repositories::{TeamRepository, UserRepository};
use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

use super::StoreResultExt;

#[derive(Clone)]
pub struct SqlUserService {
    users: UserRepository,
    teams: TeamRepository,
}

impl SqlUserService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            teams: TeamRepository::new(pool),
        }
    }
}

#[async_trait]
impl UserService for SqlUserService {
    async fn create_user(&self, request: CreateUserRequest) -> DomainResult<User> {
        let request = request.normalized();
        request.validate()?;

        let duplicate = format!("User name '{}' already exists", request.name);
        if self.users.name_exists(&request.name).await.or_store_error()? {
            return Err(DomainError::DuplicateName(duplicate));
        }

        let user = self
            .users
            .create(&request.name, &request.display_name, Utc::now())
            .await
            .or_duplicate(duplicate)?;

        info!(user_id = user.id, user_name = %user.name, "User created");
        Ok(user.into())
    }

    async fn get_user(&self, id: i64) -> DomainResult<User> {
        self.users
            .find_by_id(id)
            .await
            .or_store_error()?
            .map(User::from)
            .ok_or_else(|| DomainError::not_found(format!("User {} not found", id)))
    }

    async fn update_user(&self, id: i64, request: UpdateUserRequest) -> DomainResult<User> {
        if request.name.is_some() {
            return Err(DomainError::validation("User name cannot be updated"));
        }
        let request = request.normalized();
        request.validate()?;

        let user = self
            .users
            .update_display_name(id, &request.display_name)
            .await
            .or_store_error()?
            .ok_or_else(|| DomainError::not_found(format!("User {} not found", id)))?;

        info!(user_id = user.id, "User display name updated");
        Ok(user.into())
    }

    async fn list_users(&self) -> DomainResult<Vec<User>> {
        let users = self.users.list_all().await.or_store_error()?;
        Ok(users.into_iter().map(User::from).collect())
    }

    async fn get_user_teams(&self, id: i64) -> DomainResult<Vec<Team>> {
        self.get_user(id).await?;
        let teams = self.teams.list_for_user(id).await.or_store_error()?;
        Ok(teams.into_iter().map(Team::from).collect())
    }
}
