//! # chathub-portal
//!
//! Portal integrations for ChatHub: the identity directory that resolves
//! user ids to display names and the message store that records chat
//! history. Ships REST clients for the host portal plus in-memory
//! providers for standalone operation and tests.

pub mod directory;
pub mod memory;
pub mod provider;
pub mod store;

pub use directory::PortalDirectory;
pub use memory::{MemoryDirectory, MemoryMessageStore};
pub use provider::{build_directory, build_message_store};
pub use store::PortalMessageStore;
