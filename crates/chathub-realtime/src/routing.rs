//! Inbound message routing: private messages and typing signals.

use std::sync::Arc;

use tracing::{debug, error, warn};

use chathub_core::result::AppResult;
use chathub_core::traits::store::MessageStore;
use chathub_core::types::id::UserId;

use crate::message::codec;
use crate::message::types::{InboundMessage, OutboundFrame};
use crate::session::handle::Session;
use crate::session::registry::SessionRegistry;

/// Render the display string shown for a private message.
fn render_private_message(sender_name: &str, text: &str) -> String {
    format!("[Private] {sender_name}: {text}")
}

/// Parses inbound payloads and dispatches them to the typing-signal or
/// private-message path.
///
/// Routing matches on the literal recipient id: every session whose
/// identity equals `toUserId` gets the frame, whichever device or tab it
/// is. Chat messages are additionally echoed to the sending session and
/// appended to the message store exactly once; typing signals are
/// neither echoed nor persisted.
#[derive(Debug)]
pub struct MessageRouter {
    registry: Arc<SessionRegistry>,
    store: Arc<dyn MessageStore>,
    max_message_bytes: usize,
}

impl MessageRouter {
    /// Create a router over the given registry and store.
    pub fn new(
        registry: Arc<SessionRegistry>,
        store: Arc<dyn MessageStore>,
        max_message_bytes: usize,
    ) -> Self {
        Self {
            registry,
            store,
            max_message_bytes,
        }
    }

    /// Classify one raw payload from `sender` and dispatch it.
    ///
    /// Returns a malformed-message error for unparseable payloads; the
    /// caller logs and discards those without touching the connection.
    pub async fn route(&self, sender: &Arc<Session>, raw: &str) -> AppResult<()> {
        match codec::decode_inbound(raw, self.max_message_bytes)? {
            InboundMessage::Typing { to_user_id } => {
                self.send_typing_signal(sender, to_user_id);
            }
            InboundMessage::Message { to_user_id, text } => {
                self.send_private_message(sender, to_user_id, &text).await;
            }
        }
        Ok(())
    }

    /// One-shot typing indicator to every session of the addressed user.
    ///
    /// The sending session itself never receives the marker, even when
    /// the sender addresses their own id from another tab.
    pub fn send_typing_signal(&self, sender: &Arc<Session>, to: UserId) {
        let mut notified = 0usize;
        for session in self.registry.snapshot() {
            if session.user_id != to || session.id == sender.id {
                continue;
            }
            match session.send(OutboundFrame::Typing) {
                Ok(()) => notified += 1,
                Err(e) => {
                    warn!(session_id = %session.id, error = %e, "Typing signal skipped");
                }
            }
        }
        debug!(from = %sender.user_id, to = %to, notified, "Typing signal routed");
    }

    /// Deliver a private message to every session of the addressed user
    /// plus the sending session, then append it to the store.
    ///
    /// Delivery is the union of the two session sets, one frame per
    /// session at most, so messaging yourself does not double-send. A
    /// failed recipient is skipped; a failed append is logged and never
    /// claws back frames that were already queued.
    pub async fn send_private_message(&self, sender: &Arc<Session>, to: UserId, text: &str) {
        let frame = OutboundFrame::PrivateMessage {
            from_user_id: sender.user_id,
            text: render_private_message(&sender.display_name, text),
        };

        let mut delivered = 0usize;
        for session in self.registry.snapshot() {
            if session.user_id != to && session.id != sender.id {
                continue;
            }
            match session.send(frame.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!(session_id = %session.id, error = %e, "Private message skipped for one session");
                }
            }
        }
        debug!(from = %sender.user_id, to = %to, delivered, "Private message routed");

        match self.store.append(sender.user_id, to, text).await {
            Ok(ack) => {
                debug!(
                    from = %sender.user_id,
                    to = %to,
                    entry_id = ?ack.entry_id,
                    "Message appended to store"
                );
            }
            Err(e) => {
                error!(
                    from = %sender.user_id,
                    to = %to,
                    error = %e,
                    "Message store append failed; delivery unaffected"
                );
            }
        }
    }
}
