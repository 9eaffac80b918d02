//! # onethy-db
//!
//! Database layer implementing the repository traits with PostgreSQL via SQLx.
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgAgentRepository, PgChannelRepository, PgContactRepository, PgConversationRepository,
    PgMacroRepository, PgMessageRepository, PgNoteRepository, PgTeamRepository,
};
