//! Team service contract.

use crate::error::DomainResult;
use crate::models::{CreateTeamRequest, Team, UpdateTeamRequest, User};

/// Operations on teams and their membership rosters.
#[async_trait::async_trait]
pub trait TeamService: Send + Sync {
    /// Create a team; the admin becomes its first member.
    async fn create_team(&self, request: CreateTeamRequest) -> DomainResult<Team>;

    /// Fetch a single team.
    async fn get_team(&self, id: i64) -> DomainResult<Team>;

    /// All teams ordered by creation.
    async fn list_teams(&self) -> DomainResult<Vec<Team>>;

    /// Change name, description and/or admin. A new admin joins the team;
    /// the previous admin stays a member.
    async fn update_team(&self, id: i64, request: UpdateTeamRequest) -> DomainResult<Team>;

    /// Add members, ignoring users already present. All-or-nothing.
    async fn add_users(&self, team_id: i64, user_ids: Vec<i64>) -> DomainResult<Vec<User>>;

    /// Remove members. Rejected as a whole if the admin is among them.
    async fn remove_users(&self, team_id: i64, user_ids: Vec<i64>) -> DomainResult<Vec<User>>;

    /// Members of the team ordered by name.
    async fn list_team_users(&self, team_id: i64) -> DomainResult<Vec<User>>;
}
