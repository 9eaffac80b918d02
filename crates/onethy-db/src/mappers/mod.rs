//! Entity <-> model mappers
//!
//! `From<Model>` conversions live beside the models; status strings that fail
//! to parse fall back to the safest variant rather than erroring.

mod agent;
mod channel;
mod contact;
mod conversation;
mod macros;
mod message;
mod note;
mod team;
