//! Conversation service
//!
//! Find-or-open routing, manual and least-loaded auto-assignment, and
//! status/priority updates.

use std::collections::HashMap;

use onethy_cache::{PubSubChannel, PubSubEvent};
use onethy_core::{
    Channel, Contact, Conversation, ConversationQuery, DomainError, Snowflake,
};
use serde_json::json;
use tracing::{info, instrument};

use crate::dto::requests::UpdateConversationRequest;
use crate::dto::responses::ConversationResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Conversation service
pub struct ConversationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ConversationService<'a> {
    /// Create a new ConversationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Return the non-closed conversation for a (contact, channel) pair,
    /// opening a fresh one when none exists.
    #[instrument(skip(self, channel, contact), fields(channel_id = %channel.id, contact_id = %contact.id))]
    pub async fn find_or_open(
        &self,
        channel: &Channel,
        contact: &Contact,
    ) -> ServiceResult<Conversation> {
        if let Some(existing) = self
            .ctx
            .conversation_repo()
            .find_active(contact.id, channel.id)
            .await?
        {
            return Ok(existing);
        }

        let conversation = Conversation::open(
            self.ctx.generate_id(),
            channel.user_id,
            contact.id,
            channel.id,
        );
        self.ctx.conversation_repo().create(&conversation).await?;

        info!(conversation_id = %conversation.id, "Conversation opened");
        Ok(conversation)
    }

    /// List conversations for a tenant with filters
    #[instrument(skip(self, query))]
    pub async fn list(
        &self,
        user_id: Snowflake,
        query: ConversationQuery,
    ) -> ServiceResult<Vec<ConversationResponse>> {
        let conversations = self.ctx.conversation_repo().find_by_user(user_id, query).await?;
        Ok(conversations.iter().map(ConversationResponse::from).collect())
    }

    /// Get a conversation by ID
    #[instrument(skip(self))]
    pub async fn get(
        &self,
        id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<ConversationResponse> {
        let conversation = self.load(id, user_id).await?;
        Ok(ConversationResponse::from(&conversation))
    }

    /// Partial status/priority update; omitted fields are left unchanged
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: Snowflake,
        user_id: Snowflake,
        request: UpdateConversationRequest,
    ) -> ServiceResult<ConversationResponse> {
        let mut conversation = self.load(id, user_id).await?;

        if let Some(status) = request.status {
            conversation.status = status;
        }
        if let Some(priority) = request.priority {
            conversation.priority = priority;
        }
        conversation.updated_at = chrono::Utc::now();

        self.ctx.conversation_repo().update(&conversation).await?;

        info!(conversation_id = %id, status = %conversation.status, "Conversation updated");
        self.publish_update(&conversation).await;

        Ok(ConversationResponse::from(&conversation))
    }

    /// Manual assignment; forces the conversation back to open
    #[instrument(skip(self))]
    pub async fn assign(
        &self,
        id: Snowflake,
        user_id: Snowflake,
        agent_id: Option<Snowflake>,
        team_id: Option<Snowflake>,
    ) -> ServiceResult<ConversationResponse> {
        if agent_id.is_none() && team_id.is_none() {
            return Err(ServiceError::validation(
                "Either agent_id or team_id must be provided",
            ));
        }

        let mut conversation = self.load(id, user_id).await?;

        // Verify the targets belong to this tenant
        if let Some(agent_id) = agent_id {
            self.ctx
                .agent_repo()
                .find_by_id(agent_id, user_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Agent", agent_id.to_string()))?;
        }
        if let Some(team_id) = team_id {
            self.ctx
                .team_repo()
                .find_by_id(team_id, user_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Team", team_id.to_string()))?;
        }

        conversation.assign(agent_id, team_id);
        self.ctx.conversation_repo().update(&conversation).await?;

        info!(
            conversation_id = %id,
            agent_id = ?agent_id,
            team_id = ?team_id,
            "Conversation assigned"
        );
        self.publish_update(&conversation).await;

        Ok(ConversationResponse::from(&conversation))
    }

    /// Auto-assign to the least-loaded online member of a team.
    ///
    /// Candidates are the team members with online presence, in join order;
    /// the first one with the fewest open/pending assigned conversations wins.
    #[instrument(skip(self))]
    pub async fn auto_assign(
        &self,
        id: Snowflake,
        user_id: Snowflake,
        team_id: Snowflake,
    ) -> ServiceResult<ConversationResponse> {
        let mut conversation = self.load(id, user_id).await?;

        self.ctx
            .team_repo()
            .find_by_id(team_id, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Team", team_id.to_string()))?;

        let members = self.ctx.team_repo().member_ids(team_id).await?;
        let online = self
            .ctx
            .presence_store()
            .filter_online(&members)
            .await
            .map_err(|e| ServiceError::internal(format!("Failed to read presence: {e}")))?;

        if online.is_empty() {
            return Err(DomainError::NoAgentAvailable.into());
        }

        let counts: HashMap<Snowflake, i64> = self
            .ctx
            .conversation_repo()
            .active_counts(&online)
            .await?
            .into_iter()
            .collect();

        let winner = select_least_loaded(&online, &counts)
            .ok_or_else(|| ServiceError::from(DomainError::NoAgentAvailable))?;

        conversation.assign(Some(winner), Some(team_id));
        self.ctx.conversation_repo().update(&conversation).await?;

        info!(
            conversation_id = %id,
            agent_id = %winner,
            team_id = %team_id,
            "Conversation auto-assigned"
        );
        self.publish_update(&conversation).await;

        Ok(ConversationResponse::from(&conversation))
    }

    /// Load a tenant-scoped conversation or fail with not-found
    pub(crate) async fn load(
        &self,
        id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Conversation> {
        self.ctx
            .conversation_repo()
            .find_by_id(id, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Conversation", id.to_string()))
    }

    /// Best-effort CONVERSATION_UPDATE event for the dashboard
    async fn publish_update(&self, conversation: &Conversation) {
        let event = PubSubEvent::new(
            "CONVERSATION_UPDATE",
            json!({
                "id": conversation.id.to_string(),
                "status": conversation.status.as_str(),
                "priority": conversation.priority.as_str(),
                "assigned_agent_id": conversation.assigned_agent_id.map(|id| id.to_string()),
                "assigned_team_id": conversation.assigned_team_id.map(|id| id.to_string()),
                "unread_count": conversation.unread_count,
            }),
        );
        self.ctx
            .publisher()
            .publish(&PubSubChannel::tenant(conversation.user_id), &event)
            .await
            .ok();
    }
}

/// Pick the candidate with the fewest active conversations.
///
/// Candidates missing from `counts` carry zero load. The first minimum in
/// candidate order wins, so ties break by encounter order.
fn select_least_loaded(
    candidates: &[Snowflake],
    counts: &HashMap<Snowflake, i64>,
) -> Option<Snowflake> {
    let mut best: Option<(Snowflake, i64)> = None;
    for &candidate in candidates {
        let load = counts.get(&candidate).copied().unwrap_or(0);
        match best {
            Some((_, best_load)) if load >= best_load => {}
            _ => best = Some((candidate, load)),
        }
    }
    best.map(|(agent, _)| agent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(i64, i64)]) -> HashMap<Snowflake, i64> {
        pairs
            .iter()
            .map(|&(id, n)| (Snowflake::new(id), n))
            .collect()
    }

    #[test]
    fn test_least_loaded_picks_minimum() {
        let candidates = vec![Snowflake::new(1), Snowflake::new(2), Snowflake::new(3)];
        let counts = counts(&[(1, 5), (2, 2), (3, 4)]);
        assert_eq!(
            select_least_loaded(&candidates, &counts),
            Some(Snowflake::new(2))
        );
    }

    #[test]
    fn test_least_loaded_missing_count_is_zero() {
        let candidates = vec![Snowflake::new(1), Snowflake::new(2)];
        let counts = counts(&[(1, 1)]);
        assert_eq!(
            select_least_loaded(&candidates, &counts),
            Some(Snowflake::new(2))
        );
    }

    #[test]
    fn test_least_loaded_tie_breaks_by_order() {
        let candidates = vec![Snowflake::new(7), Snowflake::new(8), Snowflake::new(9)];
        let counts = counts(&[(7, 3), (8, 3), (9, 3)]);
        // First encountered wins
        assert_eq!(
            select_least_loaded(&candidates, &counts),
            Some(Snowflake::new(7))
        );
    }

    #[test]
    fn test_least_loaded_empty_candidates() {
        let candidates: Vec<Snowflake> = Vec::new();
        assert_eq!(select_least_loaded(&candidates, &HashMap::new()), None);
    }
}
