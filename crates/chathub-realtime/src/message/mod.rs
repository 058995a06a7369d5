//! Wire message types and their JSON codec.

pub mod codec;
pub mod types;

pub use types::{InboundMessage, OutboundFrame};
