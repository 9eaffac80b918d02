//! Database models with SQLx FromRow derives

mod agent;
mod channel;
mod contact;
mod conversation;
mod macros;
mod message;
mod note;
mod team;

pub use agent::AgentModel;
pub use channel::ChannelModel;
pub use contact::ContactModel;
pub use conversation::ConversationModel;
pub use macros::MacroModel;
pub use message::MessageModel;
pub use note::NoteModel;
pub use team::{TeamMemberModel, TeamModel};
