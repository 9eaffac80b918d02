//! Team service
//!
//! Agent groupings and membership; the membership order feeds auto-assign.

use onethy_core::{Snowflake, Team};
use tracing::{info, instrument};

use crate::dto::requests::{CreateTeamRequest, UpdateTeamRequest};
use crate::dto::responses::TeamResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Team service
pub struct TeamService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TeamService<'a> {
    /// Create a new TeamService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List teams for a tenant
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Snowflake) -> ServiceResult<Vec<TeamResponse>> {
        let teams = self.ctx.team_repo().find_by_user(user_id).await?;

        let mut responses = Vec::with_capacity(teams.len());
        for team in teams {
            let member_ids = self.ctx.team_repo().member_ids(team.id).await?;
            responses.push(TeamResponse::from_parts(&team, &member_ids));
        }
        Ok(responses)
    }

    /// Get a team by ID
    #[instrument(skip(self))]
    pub async fn get(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<TeamResponse> {
        let team = self.load(id, user_id).await?;
        let member_ids = self.ctx.team_repo().member_ids(team.id).await?;
        Ok(TeamResponse::from_parts(&team, &member_ids))
    }

    /// Create a team
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        user_id: Snowflake,
        request: CreateTeamRequest,
    ) -> ServiceResult<TeamResponse> {
        let mut team = Team::new(self.ctx.generate_id(), user_id, request.name);
        team.description = request.description;

        self.ctx.team_repo().create(&team).await?;

        info!(team_id = %team.id, "Team created");
        Ok(TeamResponse::from_parts(&team, &[]))
    }

    /// Partially update a team
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: Snowflake,
        user_id: Snowflake,
        request: UpdateTeamRequest,
    ) -> ServiceResult<TeamResponse> {
        let mut team = self.load(id, user_id).await?;

        if let Some(name) = request.name {
            team.name = name;
        }
        if request.description.is_some() {
            team.description = request.description;
        }

        self.ctx.team_repo().update(&team).await?;

        let member_ids = self.ctx.team_repo().member_ids(team.id).await?;
        info!(team_id = %id, "Team updated");
        Ok(TeamResponse::from_parts(&team, &member_ids))
    }

    /// Delete a team
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        self.load(id, user_id).await?;
        self.ctx.team_repo().delete(id, user_id).await?;

        info!(team_id = %id, "Team deleted");
        Ok(())
    }

    /// Add an agent to a team
    #[instrument(skip(self))]
    pub async fn add_member(
        &self,
        team_id: Snowflake,
        user_id: Snowflake,
        agent_id: Snowflake,
    ) -> ServiceResult<TeamResponse> {
        let team = self.load(team_id, user_id).await?;

        self.ctx
            .agent_repo()
            .find_by_id(agent_id, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Agent", agent_id.to_string()))?;

        self.ctx.team_repo().add_member(team_id, agent_id).await?;

        let member_ids = self.ctx.team_repo().member_ids(team_id).await?;
        info!(team_id = %team_id, agent_id = %agent_id, "Team member added");
        Ok(TeamResponse::from_parts(&team, &member_ids))
    }

    /// Remove an agent from a team
    #[instrument(skip(self))]
    pub async fn remove_member(
        &self,
        team_id: Snowflake,
        user_id: Snowflake,
        agent_id: Snowflake,
    ) -> ServiceResult<TeamResponse> {
        let team = self.load(team_id, user_id).await?;
        self.ctx.team_repo().remove_member(team_id, agent_id).await?;

        let member_ids = self.ctx.team_repo().member_ids(team_id).await?;
        info!(team_id = %team_id, agent_id = %agent_id, "Team member removed");
        Ok(TeamResponse::from_parts(&team, &member_ids))
    }

    async fn load(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<Team> {
        self.ctx
            .team_repo()
            .find_by_id(id, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Team", id.to_string()))
    }
}
