//! Domain entities - core business objects

mod agent;
mod channel;
mod contact;
mod conversation;
mod macros;
mod message;
mod note;
mod team;

pub use agent::Agent;
pub use channel::{generate_webhook_token, Channel, ChannelStatus, ChannelType};
pub use contact::Contact;
pub use conversation::{Conversation, ConversationStatus, Priority, PREVIEW_MAX_LEN};
pub use macros::Macro;
pub use message::{DeliveryStatus, Message, MessageType};
pub use note::Note;
pub use team::{Team, TeamMember};
