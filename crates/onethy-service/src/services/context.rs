//! Service context - dependency container for services
//!
//! Holds all repositories, cache stores, the gateway client, and other
//! dependencies needed by services.

use std::sync::Arc;

use onethy_cache::{AgentPresenceStore, Publisher, SharedRedisPool};
use onethy_common::auth::JwtService;
use onethy_core::traits::{
    AgentRepository, ChannelRepository, ContactRepository, ConversationRepository,
    MacroRepository, MessageRepository, NoteRepository, TeamRepository,
};
use onethy_core::SnowflakeGenerator;
use onethy_db::PgPool;
use onethy_provider::ProviderApi;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - Redis presence store and pub/sub publisher
/// - The WhatsApp gateway client
/// - JWT service for authentication
/// - Snowflake generator for ID generation
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Redis pool
    redis_pool: SharedRedisPool,

    // Repositories
    channel_repo: Arc<dyn ChannelRepository>,
    contact_repo: Arc<dyn ContactRepository>,
    conversation_repo: Arc<dyn ConversationRepository>,
    message_repo: Arc<dyn MessageRepository>,
    team_repo: Arc<dyn TeamRepository>,
    agent_repo: Arc<dyn AgentRepository>,
    macro_repo: Arc<dyn MacroRepository>,
    note_repo: Arc<dyn NoteRepository>,

    // Cache stores
    presence_store: AgentPresenceStore,

    // Pub/Sub
    publisher: Publisher,

    // Gateway client
    provider: Arc<dyn ProviderApi>,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,

    // Public base URL for webhook registration
    public_url: String,
}

impl ServiceContext {
    // === Database Pool ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    // === Repositories ===

    /// Get the channel repository
    pub fn channel_repo(&self) -> &dyn ChannelRepository {
        self.channel_repo.as_ref()
    }

    /// Get the contact repository
    pub fn contact_repo(&self) -> &dyn ContactRepository {
        self.contact_repo.as_ref()
    }

    /// Get the conversation repository
    pub fn conversation_repo(&self) -> &dyn ConversationRepository {
        self.conversation_repo.as_ref()
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Get the team repository
    pub fn team_repo(&self) -> &dyn TeamRepository {
        self.team_repo.as_ref()
    }

    /// Get the agent repository
    pub fn agent_repo(&self) -> &dyn AgentRepository {
        self.agent_repo.as_ref()
    }

    /// Get the macro repository
    pub fn macro_repo(&self) -> &dyn MacroRepository {
        self.macro_repo.as_ref()
    }

    /// Get the note repository
    pub fn note_repo(&self) -> &dyn NoteRepository {
        self.note_repo.as_ref()
    }

    // === Cache Stores ===

    /// Get the agent presence store
    pub fn presence_store(&self) -> &AgentPresenceStore {
        &self.presence_store
    }

    // === Pub/Sub ===

    /// Get the Redis pub/sub publisher
    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    // === Gateway ===

    /// Get the WhatsApp gateway client
    pub fn provider(&self) -> &dyn ProviderApi {
        self.provider.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> onethy_core::Snowflake {
        self.snowflake_generator.generate()
    }

    /// Webhook callback URL for a channel token
    pub fn webhook_url(&self, webhook_token: &str) -> String {
        format!(
            "{}/webhook/{webhook_token}",
            self.public_url.trim_end_matches('/')
        )
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &"SharedRedisPool")
            .field("repositories", &"...")
            .field("public_url", &self.public_url)
            .finish()
    }
}

/// Builder for creating ServiceContext
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    channel_repo: Option<Arc<dyn ChannelRepository>>,
    contact_repo: Option<Arc<dyn ContactRepository>>,
    conversation_repo: Option<Arc<dyn ConversationRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    team_repo: Option<Arc<dyn TeamRepository>>,
    agent_repo: Option<Arc<dyn AgentRepository>>,
    macro_repo: Option<Arc<dyn MacroRepository>>,
    note_repo: Option<Arc<dyn NoteRepository>>,
    provider: Option<Arc<dyn ProviderApi>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    public_url: Option<String>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            redis_pool: None,
            channel_repo: None,
            contact_repo: None,
            conversation_repo: None,
            message_repo: None,
            team_repo: None,
            agent_repo: None,
            macro_repo: None,
            note_repo: None,
            provider: None,
            jwt_service: None,
            snowflake_generator: None,
            public_url: None,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn channel_repo(mut self, repo: Arc<dyn ChannelRepository>) -> Self {
        self.channel_repo = Some(repo);
        self
    }

    pub fn contact_repo(mut self, repo: Arc<dyn ContactRepository>) -> Self {
        self.contact_repo = Some(repo);
        self
    }

    pub fn conversation_repo(mut self, repo: Arc<dyn ConversationRepository>) -> Self {
        self.conversation_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn team_repo(mut self, repo: Arc<dyn TeamRepository>) -> Self {
        self.team_repo = Some(repo);
        self
    }

    pub fn agent_repo(mut self, repo: Arc<dyn AgentRepository>) -> Self {
        self.agent_repo = Some(repo);
        self
    }

    pub fn macro_repo(mut self, repo: Arc<dyn MacroRepository>) -> Self {
        self.macro_repo = Some(repo);
        self
    }

    pub fn note_repo(mut self, repo: Arc<dyn NoteRepository>) -> Self {
        self.note_repo = Some(repo);
        self
    }

    pub fn provider(mut self, provider: Arc<dyn ProviderApi>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn public_url(mut self, url: impl Into<String>) -> Self {
        self.public_url = Some(url.into());
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        let redis_pool = self
            .redis_pool
            .ok_or_else(|| ServiceError::validation("redis_pool is required"))?;

        let inner_pool = (*redis_pool).clone();
        let presence_store = AgentPresenceStore::new(inner_pool.clone());
        let publisher = Publisher::new(inner_pool);

        Ok(ServiceContext {
            pool: self
                .pool
                .ok_or_else(|| ServiceError::validation("pool is required"))?,
            redis_pool,
            channel_repo: self
                .channel_repo
                .ok_or_else(|| ServiceError::validation("channel_repo is required"))?,
            contact_repo: self
                .contact_repo
                .ok_or_else(|| ServiceError::validation("contact_repo is required"))?,
            conversation_repo: self
                .conversation_repo
                .ok_or_else(|| ServiceError::validation("conversation_repo is required"))?,
            message_repo: self
                .message_repo
                .ok_or_else(|| ServiceError::validation("message_repo is required"))?,
            team_repo: self
                .team_repo
                .ok_or_else(|| ServiceError::validation("team_repo is required"))?,
            agent_repo: self
                .agent_repo
                .ok_or_else(|| ServiceError::validation("agent_repo is required"))?,
            macro_repo: self
                .macro_repo
                .ok_or_else(|| ServiceError::validation("macro_repo is required"))?,
            note_repo: self
                .note_repo
                .ok_or_else(|| ServiceError::validation("note_repo is required"))?,
            presence_store,
            publisher,
            provider: self
                .provider
                .ok_or_else(|| ServiceError::validation("provider is required"))?,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            snowflake_generator: self
                .snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
            public_url: self
                .public_url
                .ok_or_else(|| ServiceError::validation("public_url is required"))?,
        })
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
