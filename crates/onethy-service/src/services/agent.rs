//! Agent service
//!
//! Agent records plus the volatile presence that drives auto-assign.

use onethy_cache::AgentPresence;
use onethy_core::{Agent, Snowflake};
use tracing::{info, instrument};

use crate::dto::requests::{CreateAgentRequest, UpdateAgentRequest};
use crate::dto::responses::AgentResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Agent service
pub struct AgentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AgentService<'a> {
    /// Create a new AgentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List agents with presence attached
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Snowflake) -> ServiceResult<Vec<AgentResponse>> {
        let agents = self.ctx.agent_repo().find_by_user(user_id).await?;

        let mut responses = Vec::with_capacity(agents.len());
        for agent in agents {
            let presence = self.presence_of(agent.id).await?;
            responses.push(AgentResponse::from_parts(&agent, presence));
        }
        Ok(responses)
    }

    /// Get an agent by ID
    #[instrument(skip(self))]
    pub async fn get(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<AgentResponse> {
        let agent = self.load(id, user_id).await?;
        let presence = self.presence_of(agent.id).await?;
        Ok(AgentResponse::from_parts(&agent, presence))
    }

    /// Create an agent
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        user_id: Snowflake,
        request: CreateAgentRequest,
    ) -> ServiceResult<AgentResponse> {
        let agent = Agent::new(self.ctx.generate_id(), user_id, request.name, request.email);
        self.ctx.agent_repo().create(&agent).await?;

        info!(agent_id = %agent.id, "Agent created");
        Ok(AgentResponse::from_parts(&agent, AgentPresence::Offline))
    }

    /// Partially update an agent
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: Snowflake,
        user_id: Snowflake,
        request: UpdateAgentRequest,
    ) -> ServiceResult<AgentResponse> {
        let mut agent = self.load(id, user_id).await?;

        if let Some(name) = request.name {
            agent.name = name;
        }
        if let Some(email) = request.email {
            agent.email = email;
        }

        self.ctx.agent_repo().update(&agent).await?;

        let presence = self.presence_of(agent.id).await?;
        info!(agent_id = %id, "Agent updated");
        Ok(AgentResponse::from_parts(&agent, presence))
    }

    /// Delete an agent and drop its presence entry
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        self.load(id, user_id).await?;
        self.ctx.agent_repo().delete(id, user_id).await?;

        self.ctx
            .presence_store()
            .clear_presence(id)
            .await
            .map_err(|e| ServiceError::internal(format!("Failed to clear presence: {e}")))?;

        info!(agent_id = %id, "Agent deleted");
        Ok(())
    }

    /// Set an agent's presence
    #[instrument(skip(self))]
    pub async fn set_presence(
        &self,
        id: Snowflake,
        user_id: Snowflake,
        status: AgentPresence,
    ) -> ServiceResult<AgentResponse> {
        let agent = self.load(id, user_id).await?;

        self.ctx
            .presence_store()
            .set_presence(agent.id, status)
            .await
            .map_err(|e| ServiceError::internal(format!("Failed to set presence: {e}")))?;

        info!(agent_id = %id, status = %status, "Agent presence updated");
        Ok(AgentResponse::from_parts(&agent, status))
    }

    async fn presence_of(&self, agent_id: Snowflake) -> ServiceResult<AgentPresence> {
        self.ctx
            .presence_store()
            .get_presence(agent_id)
            .await
            .map_err(|e| ServiceError::internal(format!("Failed to read presence: {e}")))
    }

    async fn load(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<Agent> {
        self.ctx
            .agent_repo()
            .find_by_id(id, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Agent", id.to_string()))
    }
}
