//! Route definitions
//!
//! Tenant API routes live under /api/v1; the webhook ingestion endpoint and
//! health probes are mounted at the root (webhook deliveries carry no bearer
//! token, health bypasses rate limiting).

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{
    agents, channels, contacts, conversations, health, macros, messages, notes, teams, webhook,
};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // Gateway-facing webhook ingestion
        .route("/webhook/:webhook_token", post(webhook::receive_event))
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(channel_routes())
        .merge(contact_routes())
        .merge(conversation_routes())
        .merge(team_routes())
        .merge(agent_routes())
        .merge(macro_routes())
}

/// Channel routes
fn channel_routes() -> Router<AppState> {
    Router::new()
        .route("/channels", get(channels::list_channels))
        .route("/channels", post(channels::create_channel))
        .route("/channels/sync", post(channels::sync_channels))
        .route("/channels/:channel_id", get(channels::get_channel))
        .route("/channels/:channel_id", patch(channels::update_channel))
        .route("/channels/:channel_id", delete(channels::delete_channel))
        .route("/channels/:channel_id/connect", post(channels::connect_channel))
        .route("/channels/:channel_id/restart", post(channels::restart_channel))
        .route("/channels/:channel_id/logout", post(channels::logout_channel))
}

/// Contact routes
fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/contacts", get(contacts::list_contacts))
        .route("/contacts", post(contacts::create_contact))
        .route("/contacts/:contact_id", get(contacts::get_contact))
        .route("/contacts/:contact_id", patch(contacts::update_contact))
        .route("/contacts/:contact_id", delete(contacts::delete_contact))
}

/// Conversation routes (messages, read marker, notes nested underneath)
fn conversation_routes() -> Router<AppState> {
    Router::new()
        .route("/conversations", get(conversations::list_conversations))
        .route("/conversations/:conversation_id", get(conversations::get_conversation))
        .route("/conversations/:conversation_id", patch(conversations::update_conversation))
        .route(
            "/conversations/:conversation_id/assign",
            post(conversations::assign_conversation),
        )
        .route(
            "/conversations/:conversation_id/auto-assign",
            post(conversations::auto_assign_conversation),
        )
        // Messages
        .route("/conversations/:conversation_id/messages", get(messages::get_messages))
        .route("/conversations/:conversation_id/messages", post(messages::send_message))
        .route("/conversations/:conversation_id/read", post(messages::mark_read))
        // Notes
        .route("/conversations/:conversation_id/notes", get(notes::list_notes))
        .route("/conversations/:conversation_id/notes", post(notes::create_note))
        .route("/notes/:note_id", delete(notes::delete_note))
}

/// Team routes
fn team_routes() -> Router<AppState> {
    Router::new()
        .route("/teams", get(teams::list_teams))
        .route("/teams", post(teams::create_team))
        .route("/teams/:team_id", get(teams::get_team))
        .route("/teams/:team_id", patch(teams::update_team))
        .route("/teams/:team_id", delete(teams::delete_team))
        .route("/teams/:team_id/members", post(teams::add_team_member))
        .route("/teams/:team_id/members/:agent_id", delete(teams::remove_team_member))
}

/// Agent routes
fn agent_routes() -> Router<AppState> {
    Router::new()
        .route("/agents", get(agents::list_agents))
        .route("/agents", post(agents::create_agent))
        .route("/agents/:agent_id", get(agents::get_agent))
        .route("/agents/:agent_id", patch(agents::update_agent))
        .route("/agents/:agent_id", delete(agents::delete_agent))
        .route("/agents/:agent_id/presence", put(agents::update_presence))
}

/// Macro routes
fn macro_routes() -> Router<AppState> {
    Router::new()
        .route("/macros", get(macros::list_macros))
        .route("/macros", post(macros::create_macro))
        .route("/macros/:macro_id", get(macros::get_macro))
        .route("/macros/:macro_id", patch(macros::update_macro))
        .route("/macros/:macro_id", delete(macros::delete_macro))
}
