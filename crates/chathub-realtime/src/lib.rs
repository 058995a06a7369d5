//! # chathub-realtime
//!
//! Real-time relay engine for ChatHub:
//!
//! - a concurrent session registry tracking every live connection
//! - presence computation and `ONLINE_USERS` fan-out
//! - routing of private messages and typing signals
//! - connection lifecycle orchestration against the identity directory
//!   and the message store
//!
//! The engine is transport-agnostic: it hands frames to per-session
//! channels and never touches a socket itself.

pub mod engine;
pub mod lifecycle;
pub mod message;
pub mod presence;
pub mod routing;
pub mod session;

pub use engine::RelayEngine;
pub use lifecycle::ConnectionLifecycleManager;
pub use message::types::{InboundMessage, OutboundFrame};
pub use presence::PresenceBroadcaster;
pub use routing::MessageRouter;
pub use session::handle::Session;
pub use session::registry::SessionRegistry;
