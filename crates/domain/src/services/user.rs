//! User service contract.

use crate::error::DomainResult;
use crate::models::{CreateUserRequest, Team, UpdateUserRequest, User};

/// Operations on planner users.
#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Create a user. Fails with `DuplicateName` if the name is taken.
    async fn create_user(&self, request: CreateUserRequest) -> DomainResult<User>;

    /// Fetch a single user.
    async fn get_user(&self, id: i64) -> DomainResult<User>;

    /// Change a user's display name. The name itself is immutable.
    async fn update_user(&self, id: i64, request: UpdateUserRequest) -> DomainResult<User>;

    /// All users ordered by creation.
    async fn list_users(&self) -> DomainResult<Vec<User>>;

    /// Teams the user belongs to, including those it administers.
    async fn get_user_teams(&self, id: i64) -> DomainResult<Vec<Team>>;
}
