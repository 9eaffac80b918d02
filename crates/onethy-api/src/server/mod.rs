//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use onethy_cache::{RedisPool, RedisPoolConfig};
use onethy_common::{AppConfig, AppError, JwtService};
use onethy_core::SnowflakeGenerator;
use onethy_db::{
    create_pool, PgAgentRepository, PgChannelRepository, PgContactRepository,
    PgConversationRepository, PgMacroRepository, PgMessageRepository, PgNoteRepository,
    PgTeamRepository,
};
use onethy_provider::EvolutionClient;
use onethy_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware.
///
/// Health probes are merged in with the plain middleware stack so readiness
/// checks are never rate limited.
pub fn create_app(state: AppState) -> Router {
    let rate_limit = state.config().rate_limit.clone();
    let cors = state.config().cors.clone();
    let is_production = state.config().app.env.is_production();

    let api = apply_middleware_with_config(create_router(), &rate_limit, &cors, is_production);
    let health = apply_middleware(health_routes());

    api.merge(health).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = onethy_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create Redis pool
    info!("Connecting to Redis...");
    let redis_config = RedisPoolConfig::from(&config.redis);
    let redis_pool = RedisPool::new(redis_config).map_err(|e| AppError::Cache(e.to_string()))?;
    let shared_redis = Arc::new(redis_pool);
    info!("Redis connection established");

    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    // Create Snowflake generator
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    // Create the WhatsApp gateway client
    let provider = Arc::new(
        EvolutionClient::new(&config.provider).map_err(|e| AppError::Provider(e.to_string()))?,
    );

    // Create repositories
    let channel_repo = Arc::new(PgChannelRepository::new(pool.clone()));
    let contact_repo = Arc::new(PgContactRepository::new(pool.clone()));
    let conversation_repo = Arc::new(PgConversationRepository::new(pool.clone()));
    let message_repo = Arc::new(PgMessageRepository::new(pool.clone()));
    let team_repo = Arc::new(PgTeamRepository::new(pool.clone()));
    let agent_repo = Arc::new(PgAgentRepository::new(pool.clone()));
    let macro_repo = Arc::new(PgMacroRepository::new(pool.clone()));
    let note_repo = Arc::new(PgNoteRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .redis_pool(shared_redis)
        .channel_repo(channel_repo)
        .contact_repo(contact_repo)
        .conversation_repo(conversation_repo)
        .message_repo(message_repo)
        .team_repo(team_repo)
        .agent_repo(agent_repo)
        .macro_repo(macro_repo)
        .note_repo(note_repo)
        .provider(provider)
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .public_url(config.app.public_url.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
