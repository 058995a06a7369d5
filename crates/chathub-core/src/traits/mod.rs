//! Collaborator traits implemented by the portal integration crate.

pub mod directory;
pub mod store;

pub use directory::IdentityDirectory;
pub use store::{MessageStore, StoreAck};
