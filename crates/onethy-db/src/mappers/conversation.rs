//! Conversation entity <-> model mapper

use onethy_core::{Conversation, ConversationStatus, Priority, Snowflake};

use crate::models::ConversationModel;

impl From<ConversationModel> for Conversation {
    fn from(model: ConversationModel) -> Self {
        Conversation {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            contact_id: Snowflake::new(model.contact_id),
            channel_id: Snowflake::new(model.channel_id),
            status: model.status.parse().unwrap_or(ConversationStatus::Open),
            priority: model.priority.parse().unwrap_or(Priority::Medium),
            assigned_agent_id: model.assigned_agent_id.map(Snowflake::new),
            assigned_team_id: model.assigned_team_id.map(Snowflake::new),
            last_message: model.last_message,
            last_activity_at: model.last_activity_at,
            unread_count: model.unread_count,
            labels: model.labels,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
