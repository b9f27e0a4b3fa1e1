//! Team service backed by SQLite.

use async_trait::async_trait;
use chrono::Utc;
use domain::models::{
    CreateTeamRequest, Team, TeamMembersRequest, UpdateTeamRequest, User, MAX_TEAM_MEMBERS,
};
use domain::services::TeamService;
use domain::{DomainError, DomainResult};
use persistence::entities::TeamEntity;
use persistence::repositories::{TeamRepository, UserRepository};
use shared::validation::dedup_ids;
use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

use super::StoreResultExt;

#[derive(Clone)]
pub struct SqlTeamService {
    teams: TeamRepository,
    users: UserRepository,
}

impl SqlTeamService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            teams: TeamRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    async fn require_team(&self, id: i64) -> DomainResult<TeamEntity> {
        self.teams
            .find_by_id(id)
            .await
            .or_store_error()?
            .ok_or_else(|| DomainError::not_found(format!("Team {} not found", id)))
    }

    async fn require_user(&self, id: i64) -> DomainResult<()> {
        match self.users.find_by_id(id).await.or_store_error()? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(format!("User {} not found", id))),
        }
    }

    /// Validated, de-duplicated id list from a membership request.
    fn member_ids(user_ids: Vec<i64>) -> DomainResult<Vec<i64>> {
        let request = TeamMembersRequest { users: user_ids };
        request.validate()?;
        Ok(dedup_ids(&request.users))
    }

    async fn members(&self, team_id: i64) -> DomainResult<Vec<User>> {
        let members = self.teams.list_members(team_id).await.or_store_error()?;
        Ok(members.into_iter().map(User::from).collect())
    }
}

fn capacity_exceeded() -> DomainError {
    DomainError::CapacityExceeded(format!(
        "Team cannot have more than {} members",
        MAX_TEAM_MEMBERS
    ))
}

#[async_trait]
impl TeamService for SqlTeamService {
    async fn create_team(&self, request: CreateTeamRequest) -> DomainResult<Team> {
        let request = request.normalized();
        request.validate()?;

        self.require_user(request.admin).await?;

        let duplicate = format!("Team name '{}' already exists", request.name);
        if self
            .teams
            .name_exists(&request.name, None)
            .await
            .or_store_error()?
        {
            return Err(DomainError::DuplicateName(duplicate));
        }

        let team = self
            .teams
            .create_team(&request.name, &request.description, request.admin, Utc::now())
            .await
            .or_duplicate(duplicate)?;

        info!(
            team_id = team.id,
            team_name = %team.name,
            admin_id = team.admin_id,
            "Team created"
        );
        Ok(team.into())
    }

    async fn get_team(&self, id: i64) -> DomainResult<Team> {
        Ok(self.require_team(id).await?.into())
    }

    async fn list_teams(&self) -> DomainResult<Vec<Team>> {
        let teams = self.teams.list_all().await.or_store_error()?;
        Ok(teams.into_iter().map(Team::from).collect())
    }

    async fn update_team(&self, id: i64, request: UpdateTeamRequest) -> DomainResult<Team> {
        if request.is_empty() {
            return Err(DomainError::validation(
                "At least one of name, description or admin must be provided",
            ));
        }
        let request = request.normalized();
        request.validate()?;

        let team = self.require_team(id).await?;

        let duplicate = request
            .name
            .as_ref()
            .map(|name| format!("Team name '{}' already exists", name))
            .unwrap_or_default();
        if let Some(name) = &request.name {
            if self.teams.name_exists(name, Some(id)).await.or_store_error()? {
                return Err(DomainError::DuplicateName(duplicate));
            }
        }

        if let Some(admin) = request.admin {
            self.require_user(admin).await?;
            let already_member = self.teams.is_member(id, admin).await.or_store_error()?;
            if !already_member
                && self.teams.count_members(id).await.or_store_error()? as usize
                    >= MAX_TEAM_MEMBERS
            {
                return Err(capacity_exceeded());
            }
        }

        let updated = self
            .teams
            .update_team(
                id,
                request.name.as_deref(),
                request.description.as_deref(),
                request.admin,
                Utc::now(),
            )
            .await
            .or_duplicate(duplicate)?
            .ok_or_else(|| DomainError::not_found(format!("Team {} not found", id)))?;

        if updated.admin_id != team.admin_id {
            info!(
                team_id = id,
                previous_admin_id = team.admin_id,
                admin_id = updated.admin_id,
                "Team admin reassigned"
            );
        }
        info!(team_id = id, "Team updated");
        Ok(updated.into())
    }

    async fn add_users(&self, team_id: i64, user_ids: Vec<i64>) -> DomainResult<Vec<User>> {
        let ids = Self::member_ids(user_ids)?;
        self.require_team(team_id).await?;

        let existing = self.users.find_existing_ids(&ids).await.or_store_error()?;
        let missing: Vec<String> = ids
            .iter()
            .filter(|id| !existing.contains(id))
            .map(|id| id.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::not_found(format!(
                "Users not found: {}",
                missing.join(", ")
            )));
        }

        let current = self.teams.member_ids(team_id).await.or_store_error()?;
        let new_ids: Vec<i64> = ids
            .into_iter()
            .filter(|id| !current.contains(id))
            .collect();
        if current.len() + new_ids.len() > MAX_TEAM_MEMBERS {
            return Err(capacity_exceeded());
        }

        if !new_ids.is_empty() {
            self.teams
                .add_members(team_id, &new_ids, Utc::now())
                .await
                .or_store_error()?;
            info!(team_id, added = new_ids.len(), "Users added to team");
        }

        self.members(team_id).await
    }

    async fn remove_users(&self, team_id: i64, user_ids: Vec<i64>) -> DomainResult<Vec<User>> {
        let ids = Self::member_ids(user_ids)?;
        let team = self.require_team(team_id).await?;

        if ids.contains(&team.admin_id) {
            return Err(DomainError::invalid_operation(format!(
                "Cannot remove the team admin (user {}) from the team",
                team.admin_id
            )));
        }

        let removed = self
            .teams
            .remove_members(team_id, &ids)
            .await
            .or_store_error()?;
        info!(team_id, removed, "Users removed from team");

        self.members(team_id).await
    }

    async fn list_team_users(&self, team_id: i64) -> DomainResult<Vec<User>> {
        self.require_team(team_id).await?;
        self.members(team_id).await
    }
}
