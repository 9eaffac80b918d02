//! Redis pub/sub for inbox event fan-out

mod channels;
mod publisher;

pub use channels::PubSubChannel;
pub use publisher::{PubSubEvent, Publisher};
