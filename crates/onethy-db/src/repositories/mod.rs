//! PostgreSQL repository implementations

mod agent;
mod channel;
mod contact;
mod conversation;
mod error;
mod macros;
mod message;
mod note;
mod team;

pub use agent::PgAgentRepository;
pub use channel::PgChannelRepository;
pub use contact::PgContactRepository;
pub use conversation::PgConversationRepository;
pub use macros::PgMacroRepository;
pub use message::PgMessageRepository;
pub use note::PgNoteRepository;
pub use team::PgTeamRepository;
