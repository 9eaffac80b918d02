//! # onethy-provider
//!
//! Collaborator boundary to the external WhatsApp gateway (Evolution API):
//! a thin HTTP client behind the [`ProviderApi`] trait, plus the serde types
//! for the gateway's inbound webhook envelope.

pub mod client;
pub mod events;

pub use client::{
    EvolutionClient, InstanceInfo, ProviderApi, ProviderError, ProviderResult, QrCode, SentMessage,
};
pub use events::{
    map_connection_state, ConnectionInfo, EventData, IncomingMessage, MessageContent, MessageKey,
    WebhookEnvelope, EVENT_CONNECTION_UPDATE, EVENT_MESSAGES_UPSERT,
};
