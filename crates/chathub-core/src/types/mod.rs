//! Shared domain types.

pub mod id;

pub use id::{GUEST_DISPLAY_NAME, SessionId, UserId};
