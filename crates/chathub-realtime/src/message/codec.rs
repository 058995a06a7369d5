//! JSON encoding and decoding for wire messages.

use chathub_core::error::AppError;
use chathub_core::result::AppResult;

use super::types::{InboundMessage, OutboundFrame};

/// Decode one inbound payload, enforcing the configured size cap before
/// parsing.
pub fn decode_inbound(raw: &str, max_bytes: usize) -> AppResult<InboundMessage> {
    if raw.len() > max_bytes {
        return Err(AppError::malformed_message(format!(
            "payload of {} bytes exceeds the {max_bytes} byte limit",
            raw.len()
        )));
    }
    if raw.trim().is_empty() {
        return Err(AppError::malformed_message("empty payload"));
    }
    serde_json::from_str(raw)
        .map_err(|e| AppError::malformed_message(format!("unparseable payload: {e}")))
}

/// Encode an outbound frame to its wire form.
pub fn encode_frame(frame: &OutboundFrame) -> AppResult<String> {
    serde_json::to_string(frame).map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chathub_core::error::ErrorKind;
    use chathub_core::types::id::UserId;

    const MAX: usize = 65536;

    #[test]
    fn test_decode_chat_message() {
        let parsed = decode_inbound(r#"{"type":"MESSAGE","toUserId":7,"text":"hi"}"#, MAX)
            .expect("decode");
        assert_eq!(
            parsed,
            InboundMessage::Message {
                to_user_id: UserId::new(7),
                text: "hi".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let err = decode_inbound("not-json", MAX).expect_err("reject");
        assert_eq!(err.kind, ErrorKind::MalformedMessage);
    }

    #[test]
    fn test_decode_rejects_empty_payload() {
        let err = decode_inbound("   ", MAX).expect_err("reject");
        assert_eq!(err.kind, ErrorKind::MalformedMessage);
    }

    #[test]
    fn test_decode_rejects_oversized_payload() {
        let oversized = format!(
            r#"{{"type":"MESSAGE","toUserId":7,"text":"{}"}}"#,
            "x".repeat(200)
        );
        let err = decode_inbound(&oversized, 64).expect_err("reject");
        assert_eq!(err.kind, ErrorKind::MalformedMessage);
        assert!(err.message.contains("exceeds"));
    }

    #[test]
    fn test_encode_frame_round_trips() {
        let frame = OutboundFrame::welcome();
        let wire = encode_frame(&frame).expect("encode");
        let parsed: OutboundFrame = serde_json::from_str(&wire).expect("parse");
        assert_eq!(parsed, frame);
    }
}
