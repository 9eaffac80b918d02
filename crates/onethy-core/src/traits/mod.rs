//! Repository traits (ports)

mod repositories;

pub use repositories::{
    AgentRepository, ChannelRepository, ContactRepository, ConversationQuery,
    ConversationRepository, MacroRepository, MessageQuery, MessageRepository, NoteRepository,
    RepoResult, TeamRepository,
};
