//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. All lookups except webhook-token routing
//! are scoped to the owning tenant's user_id.

use async_trait::async_trait;

use crate::entities::{
    Agent, Channel, ChannelStatus, Contact, Conversation, ConversationStatus, Macro, Message,
    Note, Team,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Channel Repository
// ============================================================================

#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Find channel by ID within a tenant
    async fn find_by_id(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Channel>>;

    /// Find channel by its opaque webhook token (webhook routing, no tenant in hand)
    async fn find_by_webhook_token(&self, token: &str) -> RepoResult<Option<Channel>>;

    /// List all channels owned by a tenant
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Channel>>;

    /// Create a new channel
    async fn create(&self, channel: &Channel) -> RepoResult<()>;

    /// Persist a status change with an activity refresh
    async fn update_status(&self, id: Snowflake, status: ChannelStatus) -> RepoResult<()>;

    /// Increment the message counter and refresh the activity timestamp
    async fn record_message(&self, id: Snowflake) -> RepoResult<()>;

    /// Rename a channel
    async fn update_name(&self, id: Snowflake, user_id: Snowflake, name: &str) -> RepoResult<()>;

    /// Delete a channel
    async fn delete(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Contact Repository
// ============================================================================

#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Find contact by ID within a tenant
    async fn find_by_id(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Contact>>;

    /// Find contact by phone within a tenant
    async fn find_by_phone(&self, user_id: Snowflake, phone: &str) -> RepoResult<Option<Contact>>;

    /// List contacts for a tenant, optionally filtered by a name/phone search term
    async fn find_by_user(&self, user_id: Snowflake, search: Option<&str>) -> RepoResult<Vec<Contact>>;

    /// Create a new contact; duplicate (tenant, phone) surfaces as a conflict
    async fn create(&self, contact: &Contact) -> RepoResult<()>;

    /// Update an existing contact
    async fn update(&self, contact: &Contact) -> RepoResult<()>;

    /// Delete a contact
    async fn delete(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Conversation Repository
// ============================================================================

/// Filters for conversation listings
#[derive(Debug, Clone, Default)]
pub struct ConversationQuery {
    pub status: Option<ConversationStatus>,
    pub assigned_agent_id: Option<Snowflake>,
    pub assigned_team_id: Option<Snowflake>,
    pub channel_id: Option<Snowflake>,
    pub before: Option<Snowflake>,
    pub limit: i64,
}

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Find conversation by ID within a tenant
    async fn find_by_id(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Conversation>>;

    /// Find the non-closed conversation for a (contact, channel) pair, if any
    async fn find_active(
        &self,
        contact_id: Snowflake,
        channel_id: Snowflake,
    ) -> RepoResult<Option<Conversation>>;

    /// List conversations for a tenant with filters and cursor pagination
    async fn find_by_user(
        &self,
        user_id: Snowflake,
        query: ConversationQuery,
    ) -> RepoResult<Vec<Conversation>>;

    /// Create a new conversation
    async fn create(&self, conversation: &Conversation) -> RepoResult<()>;

    /// Persist the mutable fields of a conversation
    async fn update(&self, conversation: &Conversation) -> RepoResult<()>;

    /// Count non-closed conversations assigned to each of the given agents.
    ///
    /// Agents with zero active conversations are absent from the result.
    async fn active_counts(&self, agent_ids: &[Snowflake]) -> RepoResult<Vec<(Snowflake, i64)>>;

    /// Count non-closed conversations involving a contact (deletion guard)
    async fn count_active_by_contact(&self, contact_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Message Repository
// ============================================================================

/// Pagination options for message queries
#[derive(Debug, Clone, Default)]
pub struct MessageQuery {
    pub before: Option<Snowflake>,
    pub after: Option<Snowflake>,
    pub limit: i64,
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find message by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>>;

    /// List messages in a conversation with pagination
    async fn find_by_conversation(
        &self,
        conversation_id: Snowflake,
        query: MessageQuery,
    ) -> RepoResult<Vec<Message>>;

    /// Create a new message
    async fn create(&self, message: &Message) -> RepoResult<()>;

    /// Mark every undread inbound message in a conversation as read.
    ///
    /// Returns the number of rows moved forward; repeated calls return 0.
    async fn mark_read(&self, conversation_id: Snowflake) -> RepoResult<u64>;
}

// ============================================================================
// Team Repository
// ============================================================================

#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Find team by ID within a tenant
    async fn find_by_id(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Team>>;

    /// List all teams owned by a tenant
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Team>>;

    /// Create a new team
    async fn create(&self, team: &Team) -> RepoResult<()>;

    /// Update an existing team
    async fn update(&self, team: &Team) -> RepoResult<()>;

    /// Delete a team
    async fn delete(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<()>;

    /// Add an agent to a team (idempotent)
    async fn add_member(&self, team_id: Snowflake, agent_id: Snowflake) -> RepoResult<()>;

    /// Remove an agent from a team
    async fn remove_member(&self, team_id: Snowflake, agent_id: Snowflake) -> RepoResult<()>;

    /// Agent ids of a team's members, ordered by join time (assignment order)
    async fn member_ids(&self, team_id: Snowflake) -> RepoResult<Vec<Snowflake>>;
}

// ============================================================================
// Agent Repository
// ============================================================================

#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Find agent by ID within a tenant
    async fn find_by_id(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Agent>>;

    /// List all agents belonging to a tenant
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Agent>>;

    /// Create a new agent
    async fn create(&self, agent: &Agent) -> RepoResult<()>;

    /// Update an existing agent
    async fn update(&self, agent: &Agent) -> RepoResult<()>;

    /// Delete an agent
    async fn delete(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Macro Repository
// ============================================================================

#[async_trait]
pub trait MacroRepository: Send + Sync {
    /// Find macro by ID within a tenant
    async fn find_by_id(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Macro>>;

    /// List all macros owned by a tenant
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Macro>>;

    /// Create a new macro; duplicate (tenant, shortcut) surfaces as a conflict
    async fn create(&self, r#macro: &Macro) -> RepoResult<()>;

    /// Update an existing macro
    async fn update(&self, r#macro: &Macro) -> RepoResult<()>;

    /// Delete a macro
    async fn delete(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Note Repository
// ============================================================================

#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// List notes on a conversation, oldest first
    async fn find_by_conversation(&self, conversation_id: Snowflake) -> RepoResult<Vec<Note>>;

    /// Create a new note
    async fn create(&self, note: &Note) -> RepoResult<()>;

    /// Delete a note
    async fn delete(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<()>;
}
