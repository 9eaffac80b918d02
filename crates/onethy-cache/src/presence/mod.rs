//! Agent presence storage

mod agent_presence;

pub use agent_presence::{AgentPresence, AgentPresenceStore, PresenceData};
