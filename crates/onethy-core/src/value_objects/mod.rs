//! Value objects - immutable domain primitives

mod jid;
mod snowflake;

pub use jid::bare_phone;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
