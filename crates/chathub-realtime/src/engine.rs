//! Top-level relay engine that ties together all subsystems.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

use chathub_core::config::realtime::RealtimeConfig;
use chathub_core::traits::directory::IdentityDirectory;
use chathub_core::traits::store::MessageStore;
use chathub_core::types::id::UserId;

use crate::lifecycle::ConnectionLifecycleManager;
use crate::presence::PresenceBroadcaster;
use crate::routing::MessageRouter;
use crate::session::registry::SessionRegistry;

/// Central engine that coordinates the session registry, presence
/// broadcast, message routing, and connection lifecycle.
#[derive(Debug, Clone)]
pub struct RelayEngine {
    /// Session registry.
    pub registry: Arc<SessionRegistry>,
    /// Presence broadcaster.
    pub presence: Arc<PresenceBroadcaster>,
    /// Message router.
    pub router: Arc<MessageRouter>,
    /// Connection lifecycle manager.
    pub lifecycle: Arc<ConnectionLifecycleManager>,
    /// Shutdown signal sender.
    shutdown_tx: broadcast::Sender<()>,
}

impl RelayEngine {
    /// Creates a new relay engine with all subsystems wired to the given
    /// collaborators.
    pub fn new(
        config: &RealtimeConfig,
        directory: Arc<dyn IdentityDirectory>,
        store: Arc<dyn MessageStore>,
    ) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        let registry = Arc::new(SessionRegistry::new());
        let presence = Arc::new(PresenceBroadcaster::new(registry.clone()));
        let router = Arc::new(MessageRouter::new(
            registry.clone(),
            store,
            config.max_message_bytes,
        ));
        let lifecycle = Arc::new(ConnectionLifecycleManager::new(
            registry.clone(),
            presence.clone(),
            router.clone(),
            directory,
            config.session_buffer_size,
        ));

        info!("Relay engine initialized");

        Self {
            registry,
            presence,
            router,
            lifecycle,
            shutdown_tx,
        }
    }

    /// Returns a shutdown receiver for graceful shutdown coordination.
    /// Socket loops subscribe and exit when it fires.
    pub fn shutdown_receiver(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Number of currently registered sessions.
    pub fn session_count(&self) -> usize {
        self.registry.len()
    }

    /// Distinct identified user ids currently online.
    pub fn online_user_ids(&self) -> BTreeSet<UserId> {
        self.presence.online_user_ids()
    }

    /// Initiates a graceful shutdown: closes every session and signals
    /// subscribed socket loops to stop.
    pub fn shutdown(&self) {
        let drained = self.registry.drain();
        let _ = self.shutdown_tx.send(());
        info!(closed = drained.len(), "Relay engine shut down");
    }
}
