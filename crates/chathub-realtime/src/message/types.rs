//! Inbound and outbound wire message type definitions.
//!
//! The chat protocol uses `SCREAMING_SNAKE_CASE` type tags and camelCase
//! field names on both directions of the socket.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use chathub_core::types::id::UserId;

/// Greeting text sent to a session right after it registers.
pub const WELCOME_TEXT: &str = "Welcome! You are connected.";

/// Messages sent by the client to the server.
///
/// Unknown type tags and missing required fields fail at parse time, so
/// malformed traffic is rejected before it reaches the router. Extra
/// fields are tolerated; some clients send an empty `text` alongside
/// `TYPING`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum InboundMessage {
    /// A private chat message addressed to one user id.
    Message {
        /// Addressed recipient.
        to_user_id: UserId,
        /// Message body as typed by the sender.
        text: String,
    },
    /// A typing notification addressed to one user id.
    Typing {
        /// Addressed recipient.
        to_user_id: UserId,
    },
}

/// Frames sent by the server to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum OutboundFrame {
    /// Greeting for a newly registered session.
    Welcome {
        /// Fixed greeting text.
        text: String,
    },
    /// The distinct identified user ids currently online.
    OnlineUsers {
        /// Sorted ascending; guests are excluded.
        active_ids: BTreeSet<UserId>,
    },
    /// A private message relayed to this session.
    PrivateMessage {
        /// Identity of the sending session.
        from_user_id: UserId,
        /// Rendered display string, not the raw body.
        text: String,
    },
    /// Typing-indicator marker; carries no payload.
    Typing,
}

impl OutboundFrame {
    /// Greeting frame for a new session.
    pub fn welcome() -> Self {
        Self::Welcome {
            text: WELCOME_TEXT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[i64]) -> BTreeSet<UserId> {
        raw.iter().map(|&n| UserId::new(n)).collect()
    }

    #[test]
    fn test_inbound_message_parses_camel_case() {
        let parsed: InboundMessage =
            serde_json::from_str(r#"{"type":"MESSAGE","toUserId":7,"text":"hi"}"#)
                .expect("parse");
        assert_eq!(
            parsed,
            InboundMessage::Message {
                to_user_id: UserId::new(7),
                text: "hi".to_string(),
            }
        );
    }

    #[test]
    fn test_inbound_typing_tolerates_extra_text_field() {
        let parsed: InboundMessage =
            serde_json::from_str(r#"{"type":"TYPING","toUserId":7,"text":""}"#).expect("parse");
        assert_eq!(
            parsed,
            InboundMessage::Typing {
                to_user_id: UserId::new(7),
            }
        );
    }

    #[test]
    fn test_inbound_rejects_unknown_type_tag() {
        assert!(serde_json::from_str::<InboundMessage>(r#"{"type":"PING"}"#).is_err());
    }

    #[test]
    fn test_inbound_message_requires_text() {
        assert!(
            serde_json::from_str::<InboundMessage>(r#"{"type":"MESSAGE","toUserId":7}"#).is_err()
        );
    }

    #[test]
    fn test_online_users_serializes_sorted() {
        let frame = OutboundFrame::OnlineUsers {
            active_ids: ids(&[42, 7]),
        };
        assert_eq!(
            serde_json::to_string(&frame).expect("serialize"),
            r#"{"type":"ONLINE_USERS","activeIds":[7,42]}"#
        );
    }

    #[test]
    fn test_welcome_frame_shape() {
        assert_eq!(
            serde_json::to_string(&OutboundFrame::welcome()).expect("serialize"),
            r#"{"type":"WELCOME","text":"Welcome! You are connected."}"#
        );
    }

    #[test]
    fn test_private_message_frame_shape() {
        let frame = OutboundFrame::PrivateMessage {
            from_user_id: UserId::new(42),
            text: "[Private] Ana Torres: hi".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&frame).expect("serialize"),
            r#"{"type":"PRIVATE_MESSAGE","fromUserId":42,"text":"[Private] Ana Torres: hi"}"#
        );
    }

    #[test]
    fn test_typing_frame_is_bare_marker() {
        assert_eq!(
            serde_json::to_string(&OutboundFrame::Typing).expect("serialize"),
            r#"{"type":"TYPING"}"#
        );
    }
}
