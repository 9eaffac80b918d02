//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use onethy_cache::AgentPresence;
use onethy_core::{Agent, Channel, Contact, Conversation, Macro, Message, Note, Snowflake};
use onethy_provider::QrCode;

use super::responses::{
    AgentResponse, ChannelResponse, ContactResponse, ConversationResponse, MacroResponse,
    MessageResponse, NoteResponse, QrCodeResponse, TeamResponse,
};

// ============================================================================
// Channel Mappers
// ============================================================================

impl From<&Channel> for ChannelResponse {
    fn from(channel: &Channel) -> Self {
        Self {
            id: channel.id.to_string(),
            name: channel.name.clone(),
            channel_type: channel.channel_type.as_str().to_string(),
            status: channel.status.as_str().to_string(),
            instance_name: channel.instance_name.clone(),
            webhook_token: channel.webhook_token.clone(),
            message_count: channel.message_count,
            last_activity_at: channel.last_activity_at,
            created_at: channel.created_at,
        }
    }
}

impl From<Channel> for ChannelResponse {
    fn from(channel: Channel) -> Self {
        Self::from(&channel)
    }
}

impl From<QrCode> for QrCodeResponse {
    fn from(qr: QrCode) -> Self {
        Self {
            code: qr.code,
            base64: qr.base64,
        }
    }
}

// ============================================================================
// Contact Mappers
// ============================================================================

impl From<&Contact> for ContactResponse {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id.to_string(),
            name: contact.name.clone(),
            phone: contact.phone.clone(),
            email: contact.email.clone(),
            notes: contact.notes.clone(),
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        }
    }
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self::from(&contact)
    }
}

// ============================================================================
// Conversation Mappers
// ============================================================================

impl From<&Conversation> for ConversationResponse {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id.to_string(),
            contact_id: conversation.contact_id.to_string(),
            channel_id: conversation.channel_id.to_string(),
            status: conversation.status.as_str().to_string(),
            priority: conversation.priority.as_str().to_string(),
            assigned_agent_id: conversation.assigned_agent_id.map(|id| id.to_string()),
            assigned_team_id: conversation.assigned_team_id.map(|id| id.to_string()),
            last_message: conversation.last_message.clone(),
            last_activity_at: conversation.last_activity_at,
            unread_count: conversation.unread_count,
            labels: conversation.labels.clone(),
            created_at: conversation.created_at,
        }
    }
}

impl From<Conversation> for ConversationResponse {
    fn from(conversation: Conversation) -> Self {
        Self::from(&conversation)
    }
}

// ============================================================================
// Message Mappers
// ============================================================================

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.to_string(),
            conversation_id: message.conversation_id.to_string(),
            from_me: message.from_me,
            content: message.content.clone(),
            message_type: message.message_type.as_str().to_string(),
            status: message.status.as_str().to_string(),
            external_id: message.external_id.clone(),
            push_name: message.push_name.clone(),
            created_at: message.created_at,
        }
    }
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self::from(&message)
    }
}

// ============================================================================
// Team / Agent Mappers
// ============================================================================

impl TeamResponse {
    /// Build from a team entity plus its member ids
    #[must_use]
    pub fn from_parts(team: &onethy_core::Team, member_ids: &[Snowflake]) -> Self {
        Self {
            id: team.id.to_string(),
            name: team.name.clone(),
            description: team.description.clone(),
            member_ids: member_ids.iter().map(|id| id.to_string()).collect(),
            created_at: team.created_at,
        }
    }
}

impl AgentResponse {
    /// Build from an agent entity plus its cached presence
    #[must_use]
    pub fn from_parts(agent: &Agent, presence: AgentPresence) -> Self {
        Self {
            id: agent.id.to_string(),
            name: agent.name.clone(),
            email: agent.email.clone(),
            presence: presence.to_string(),
            created_at: agent.created_at,
        }
    }
}

// ============================================================================
// Macro / Note Mappers
// ============================================================================

impl From<&Macro> for MacroResponse {
    fn from(r#macro: &Macro) -> Self {
        Self {
            id: r#macro.id.to_string(),
            shortcut: r#macro.shortcut.clone(),
            content: r#macro.content.clone(),
            created_at: r#macro.created_at,
            updated_at: r#macro.updated_at,
        }
    }
}

impl From<Macro> for MacroResponse {
    fn from(r#macro: Macro) -> Self {
        Self::from(&r#macro)
    }
}

impl From<&Note> for NoteResponse {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.to_string(),
            conversation_id: note.conversation_id.to_string(),
            author_agent_id: note.author_agent_id.map(|id| id.to_string()),
            content: note.content.clone(),
            created_at: note.created_at,
        }
    }
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self::from(&note)
    }
}
