//! Connection lifecycle orchestration: open, inbound, close, error.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use chathub_core::result::AppResult;
use chathub_core::traits::directory::IdentityDirectory;
use chathub_core::types::id::{GUEST_DISPLAY_NAME, UserId};

use crate::message::types::OutboundFrame;
use crate::presence::PresenceBroadcaster;
use crate::routing::MessageRouter;
use crate::session::handle::Session;
use crate::session::registry::SessionRegistry;

/// Drives a connection through open, registered, and closed, keeping the
/// registry and the presence view in step with transport events.
///
/// Transport code calls exactly one of [`disconnect`](Self::disconnect)
/// or [`connection_error`](Self::connection_error) when a socket ends;
/// both are safe to race because registry removal is idempotent.
#[derive(Debug)]
pub struct ConnectionLifecycleManager {
    registry: Arc<SessionRegistry>,
    presence: Arc<PresenceBroadcaster>,
    router: Arc<MessageRouter>,
    directory: Arc<dyn IdentityDirectory>,
    session_buffer_size: usize,
}

impl ConnectionLifecycleManager {
    /// Create a lifecycle manager over the shared subsystems.
    pub fn new(
        registry: Arc<SessionRegistry>,
        presence: Arc<PresenceBroadcaster>,
        router: Arc<MessageRouter>,
        directory: Arc<dyn IdentityDirectory>,
        session_buffer_size: usize,
    ) -> Self {
        Self {
            registry,
            presence,
            router,
            directory,
            session_buffer_size,
        }
    }

    /// Register a new connection.
    ///
    /// Resolves the caller identity (guest label when absent or when the
    /// directory fails), adds the session to the registry, greets it with
    /// the welcome frame, and rebroadcasts presence to everyone. Returns
    /// the session handle plus the receiver the transport task drains.
    pub async fn connect(
        &self,
        user_id: Option<UserId>,
    ) -> AppResult<(Arc<Session>, mpsc::Receiver<OutboundFrame>)> {
        let user_id = user_id.unwrap_or(UserId::GUEST);
        let display_name = self.resolve_display_name(user_id).await;

        let (tx, rx) = mpsc::channel(self.session_buffer_size);
        let session = Arc::new(Session::new(user_id, display_name, tx));

        if let Err(e) = self.registry.add(session.clone()) {
            // Registry invariant violation. Refuse this connection and
            // leave the existing entry untouched.
            error!(
                session_id = %session.id,
                user_id = %user_id,
                error = %e,
                "Session registration refused"
            );
            session.mark_closed();
            return Err(e);
        }

        info!(
            session_id = %session.id,
            user_id = %user_id,
            display_name = %session.display_name,
            active_sessions = self.registry.len(),
            "Connection registered"
        );

        if let Err(e) = session.send(OutboundFrame::welcome()) {
            warn!(session_id = %session.id, error = %e, "Welcome frame skipped");
        }
        self.presence.broadcast_online_users();

        Ok((session, rx))
    }

    /// Forward one raw inbound payload to the router.
    ///
    /// Malformed payloads are logged and dropped here; nothing propagates
    /// past this boundary and the connection stays open.
    pub async fn inbound(&self, session: &Arc<Session>, raw: &str) {
        if let Err(e) = self.router.route(session, raw).await {
            warn!(
                session_id = %session.id,
                user_id = %session.user_id,
                error = %e,
                "Inbound payload discarded"
            );
        }
    }

    /// Handle a normal close, whether peer-initiated or local.
    pub fn disconnect(&self, session: &Arc<Session>) {
        session.mark_closed();
        let evicted = self.registry.remove(session.id).is_some();
        info!(
            session_id = %session.id,
            user_id = %session.user_id,
            evicted,
            active_sessions = self.registry.len(),
            "Connection closed"
        );
        self.presence.broadcast_online_users();
    }

    /// Handle a transport-level failure.
    ///
    /// The failed peer is not notified; everyone else observes it leave
    /// through the presence rebroadcast.
    pub fn connection_error(&self, session: &Arc<Session>, reason: &str) {
        session.mark_closed();
        self.registry.remove(session.id);
        warn!(
            session_id = %session.id,
            user_id = %session.user_id,
            reason,
            "Connection errored"
        );
        self.presence.broadcast_online_users();
    }

    async fn resolve_display_name(&self, user_id: UserId) -> String {
        if !user_id.is_identified() {
            return GUEST_DISPLAY_NAME.to_string();
        }
        match self.directory.resolve(user_id).await {
            Ok(name) => name,
            Err(e) => {
                warn!(
                    user_id = %user_id,
                    error = %e,
                    "Identity lookup failed, using guest label"
                );
                GUEST_DISPLAY_NAME.to_string()
            }
        }
    }
}
