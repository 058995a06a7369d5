//! Message store backed by the portal's chat-message object API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use chathub_core::config::portal::PortalConfig;
use chathub_core::error::{AppError, ErrorKind};
use chathub_core::result::AppResult;
use chathub_core::traits::store::{MessageStore, StoreAck};
use chathub_core::types::id::UserId;

/// Wire shape of one chat-message entry as the portal expects it.
#[derive(Debug, Serialize)]
struct ChatMessageEntry<'a> {
    #[serde(rename = "messageText")]
    message_text: &'a str,
    #[serde(rename = "senderId")]
    sender_id: i64,
    #[serde(rename = "receiverId")]
    receiver_id: i64,
}

/// Fields read back from a created entry.
#[derive(Debug, Default, Deserialize)]
struct ChatMessageCreated {
    id: Option<i64>,
}

/// Appends chat history through `POST {base}/o/c/chatmessages`.
#[derive(Debug)]
pub struct PortalMessageStore {
    client: reqwest::Client,
    base_url: String,
    username: Option<String>,
    password: Option<String>,
}

impl PortalMessageStore {
    /// Build a store client from portal configuration.
    pub fn new(config: &PortalConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build portal HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn entries_url(&self) -> String {
        format!("{}/o/c/chatmessages", self.base_url)
    }
}

#[async_trait]
impl MessageStore for PortalMessageStore {
    async fn append(&self, sender: UserId, receiver: UserId, text: &str) -> AppResult<StoreAck> {
        let entry = ChatMessageEntry {
            message_text: text,
            sender_id: sender.as_i64(),
            receiver_id: receiver.as_i64(),
        };

        let mut request = self.client.post(self.entries_url()).json(&entry);
        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_deref());
        }

        let response = request.send().await.map_err(|e| {
            AppError::with_source(ErrorKind::Store, "chat-message append request failed", e)
        })?;
        if !response.status().is_success() {
            return Err(AppError::store(format!(
                "chat-message append returned {}",
                response.status()
            )));
        }

        // A 2xx means the entry landed; an unreadable body only loses the
        // assigned id.
        let created = response
            .json::<ChatMessageCreated>()
            .await
            .unwrap_or_default();
        debug!(
            sender = %sender,
            receiver = %receiver,
            entry_id = ?created.id,
            "Chat message appended to portal"
        );
        Ok(StoreAck {
            entry_id: created.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_url() {
        let config = PortalConfig {
            provider: "portal".to_string(),
            base_url: "https://portal.example.com/".to_string(),
            ..PortalConfig::default()
        };
        let store = PortalMessageStore::new(&config).expect("build");
        assert_eq!(store.entries_url(), "https://portal.example.com/o/c/chatmessages");
    }

    #[test]
    fn test_entry_serializes_with_portal_field_names() {
        let entry = ChatMessageEntry {
            message_text: "hi",
            sender_id: 42,
            receiver_id: 7,
        };
        assert_eq!(
            serde_json::to_string(&entry).expect("serialize"),
            r#"{"messageText":"hi","senderId":42,"receiverId":7}"#
        );
    }
}
