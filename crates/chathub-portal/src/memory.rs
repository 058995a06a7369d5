//! In-memory directory and store providers for standalone mode and tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;

use chathub_core::error::AppError;
use chathub_core::result::AppResult;
use chathub_core::traits::directory::IdentityDirectory;
use chathub_core::traits::store::{MessageStore, StoreAck};
use chathub_core::types::id::UserId;

/// Identity directory backed by a seeded in-process map.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    names: DashMap<UserId, String>,
}

impl MemoryDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self {
            names: DashMap::new(),
        }
    }

    /// Seed or replace one directory entry.
    pub fn insert(&self, id: UserId, name: impl Into<String>) {
        self.names.insert(id, name.into());
    }
}

#[async_trait]
impl IdentityDirectory for MemoryDirectory {
    async fn resolve(&self, id: UserId) -> AppResult<String> {
        if !id.is_identified() {
            return Err(AppError::identity_lookup(format!(
                "non-positive user id {id}"
            )));
        }
        self.names
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::identity_lookup(format!("no directory entry for user {id}")))
    }
}

/// One message recorded by [`MemoryMessageStore`].
#[derive(Debug, Clone)]
pub struct StoredMessage {
    /// Identity of the sender.
    pub sender: UserId,
    /// Addressed recipient.
    pub receiver: UserId,
    /// Raw message body.
    pub text: String,
    /// When the append happened.
    pub appended_at: DateTime<Utc>,
}

/// Message store that appends into process memory.
///
/// History vanishes on restart; tests inspect the log through
/// [`appended`](Self::appended).
#[derive(Debug, Default)]
pub struct MemoryMessageStore {
    messages: Mutex<Vec<StoredMessage>>,
}

impl MemoryMessageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything appended so far, in append order.
    pub fn appended(&self) -> Vec<StoredMessage> {
        self.messages.lock().clone()
    }

    /// Number of appended messages.
    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    /// Whether nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn append(&self, sender: UserId, receiver: UserId, text: &str) -> AppResult<StoreAck> {
        let mut messages = self.messages.lock();
        messages.push(StoredMessage {
            sender,
            receiver,
            text: text.to_string(),
            appended_at: Utc::now(),
        });
        Ok(StoreAck {
            entry_id: Some(messages.len() as i64),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chathub_core::error::ErrorKind;

    #[tokio::test]
    async fn test_directory_resolves_seeded_entry() {
        let directory = MemoryDirectory::new();
        directory.insert(UserId::new(42), "Ana Torres");

        let name = directory.resolve(UserId::new(42)).await.expect("resolve");
        assert_eq!(name, "Ana Torres");
    }

    #[tokio::test]
    async fn test_directory_fails_for_unknown_and_guest_ids() {
        let directory = MemoryDirectory::new();

        let err = directory.resolve(UserId::new(9)).await.expect_err("unknown");
        assert_eq!(err.kind, ErrorKind::IdentityLookup);
        let err = directory.resolve(UserId::GUEST).await.expect_err("guest");
        assert_eq!(err.kind, ErrorKind::IdentityLookup);
    }

    #[tokio::test]
    async fn test_store_appends_in_order_with_entry_ids() {
        let store = MemoryMessageStore::new();

        let first = store
            .append(UserId::new(42), UserId::new(7), "hi")
            .await
            .expect("append");
        let second = store
            .append(UserId::new(7), UserId::new(42), "hello back")
            .await
            .expect("append");

        assert_eq!(first.entry_id, Some(1));
        assert_eq!(second.entry_id, Some(2));

        let appended = store.appended();
        assert_eq!(appended.len(), 2);
        assert_eq!(appended[0].text, "hi");
        assert_eq!(appended[1].sender, UserId::new(7));
    }
}
