//! # onethy-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use dto::requests::*;
pub use dto::responses::*;
pub use services::{
    AgentService, ChannelService, ContactService, ConversationService, MacroService,
    MessageService, NoteService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, TeamService, WebhookService,
};
