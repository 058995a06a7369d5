//! Individual connection session handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use chathub_core::error::AppError;
use chathub_core::result::AppResult;
use chathub_core::types::id::{SessionId, UserId};

use crate::message::types::OutboundFrame;

/// One live connection and its resolved identity.
///
/// Holds the sender half of the transport channel for pushing frames to
/// the client; the socket task owns the receiver and the socket itself.
/// Several sessions may carry the same `user_id` (one per tab or device),
/// so the registry keys on `id`, never on the user.
#[derive(Debug)]
pub struct Session {
    /// Unique session id, minted at registration.
    pub id: SessionId,
    /// Portal identity; `UserId::GUEST` when unauthenticated.
    pub user_id: UserId,
    /// Resolved display name, or the guest label.
    pub display_name: String,
    /// When the connection was established.
    pub connected_at: DateTime<Utc>,
    /// Sender for outbound frames.
    outbound: mpsc::Sender<OutboundFrame>,
    /// Whether the session is still open.
    open: AtomicBool,
}

impl Session {
    /// Create a new session handle around a transport channel.
    pub fn new(
        user_id: UserId,
        display_name: impl Into<String>,
        outbound: mpsc::Sender<OutboundFrame>,
    ) -> Self {
        Self {
            id: SessionId::new(),
            user_id,
            display_name: display_name.into(),
            connected_at: Utc::now(),
            outbound,
            open: AtomicBool::new(true),
        }
    }

    /// Whether the session still looks deliverable from this process.
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst) && !self.outbound.is_closed()
    }

    /// Mark the session closed; further sends fail fast.
    pub fn mark_closed(&self) {
        self.open.store(false, Ordering::SeqCst);
    }

    /// Queue one frame for the transport task.
    ///
    /// Never blocks: a full buffer drops the frame, and a closed channel
    /// marks the session closed. Both report the recipient unreachable so
    /// callers can skip this session and move on.
    pub fn send(&self, frame: OutboundFrame) -> AppResult<()> {
        if !self.open.load(Ordering::SeqCst) {
            return Err(AppError::recipient_unreachable(format!(
                "session {} is closed",
                self.id
            )));
        }
        match self.outbound.try_send(frame) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => Err(AppError::recipient_unreachable(
                format!("session {} send buffer full, frame dropped", self.id),
            )),
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_closed();
                Err(AppError::recipient_unreachable(format!(
                    "session {} transport channel closed",
                    self.id
                )))
            }
        }
    }
}
