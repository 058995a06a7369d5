//! Message store trait for recording delivered chat messages.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;
use crate::types::id::UserId;

/// Acknowledgement returned by a successful append.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreAck {
    /// Backend-assigned entry id, when the store provides one.
    pub entry_id: Option<i64>,
}

/// Trait for message persistence backends (portal REST API or in-memory).
///
/// Appends are best-effort: delivery never waits on or rolls back for
/// this store, and a failed append is logged and dropped.
#[async_trait]
pub trait MessageStore: Send + Sync + std::fmt::Debug + 'static {
    /// Append one chat message. Called exactly once per delivered message,
    /// with the raw text as typed by the sender.
    async fn append(&self, sender: UserId, receiver: UserId, text: &str) -> AppResult<StoreAck>;
}
