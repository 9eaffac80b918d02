//! # onethy-cache
//!
//! Cache layer backed by Redis: agent presence (consumed by auto-assign) and
//! pub/sub fan-out of inbox events toward the dashboard delivery tier.

pub mod pool;
pub mod presence;
pub mod pubsub;

pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool};
pub use presence::{AgentPresence, AgentPresenceStore, PresenceData};
pub use pubsub::{PubSubChannel, PubSubEvent, Publisher};
