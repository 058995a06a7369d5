//! Presence computation and `ONLINE_USERS` fan-out.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, warn};

use chathub_core::types::id::UserId;

use crate::message::types::OutboundFrame;
use crate::session::registry::SessionRegistry;

/// Computes the distinct online-user set and fans it out to every open
/// session.
///
/// Presence is derived, never stored: the registry is the single source
/// of truth, so a crashed connection disappears from the set the moment
/// it is unregistered.
#[derive(Debug)]
pub struct PresenceBroadcaster {
    registry: Arc<SessionRegistry>,
}

impl PresenceBroadcaster {
    /// Create a broadcaster over the given registry.
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    /// Distinct identified user ids currently registered, sorted
    /// ascending. Multiple sessions of one user collapse to a single
    /// entry; guests are excluded.
    pub fn online_user_ids(&self) -> BTreeSet<UserId> {
        self.registry
            .snapshot()
            .iter()
            .filter(|s| s.user_id.is_identified())
            .map(|s| s.user_id)
            .collect()
    }

    /// Send the current `ONLINE_USERS` frame to every open session.
    ///
    /// Both the id set and the recipient list come from one registry
    /// snapshot, and no lock is held while frames are queued. A recipient
    /// that fails is skipped and logged; the rest still receive the
    /// frame.
    pub fn broadcast_online_users(&self) {
        let snapshot = self.registry.snapshot();
        let active_ids: BTreeSet<UserId> = snapshot
            .iter()
            .filter(|s| s.user_id.is_identified())
            .map(|s| s.user_id)
            .collect();
        let online = active_ids.len();
        let frame = OutboundFrame::OnlineUsers { active_ids };

        let mut delivered = 0usize;
        for session in &snapshot {
            if !session.is_open() {
                continue;
            }
            match session.send(frame.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!(session_id = %session.id, error = %e, "Presence frame skipped");
                }
            }
        }

        debug!(
            online,
            sessions = snapshot.len(),
            delivered,
            "Presence broadcast"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::handle::Session;
    use tokio::sync::mpsc;

    fn register(registry: &SessionRegistry, user_id: i64) -> mpsc::Receiver<OutboundFrame> {
        let (tx, rx) = mpsc::channel(8);
        registry
            .add(Arc::new(Session::new(UserId::new(user_id), "test", tx)))
            .expect("add");
        rx
    }

    #[test]
    fn test_online_ids_collapse_and_exclude_guests() {
        let registry = Arc::new(SessionRegistry::new());
        let presence = PresenceBroadcaster::new(registry.clone());
        let _rx1 = register(&registry, 42);
        let _rx2 = register(&registry, 42);
        let _rx3 = register(&registry, 7);
        let _rx4 = register(&registry, 0);

        let ids: Vec<UserId> = presence.online_user_ids().into_iter().collect();
        assert_eq!(ids, vec![UserId::new(7), UserId::new(42)]);
    }

    #[test]
    fn test_broadcast_reaches_guests_too() {
        let registry = Arc::new(SessionRegistry::new());
        let presence = PresenceBroadcaster::new(registry.clone());
        let mut rx_user = register(&registry, 42);
        let mut rx_guest = register(&registry, 0);

        presence.broadcast_online_users();

        let expected = OutboundFrame::OnlineUsers {
            active_ids: [UserId::new(42)].into_iter().collect(),
        };
        assert_eq!(rx_user.try_recv().expect("frame"), expected);
        assert_eq!(rx_guest.try_recv().expect("frame"), expected);
    }

    #[test]
    fn test_broadcast_skips_dead_transport_without_aborting() {
        let registry = Arc::new(SessionRegistry::new());
        let presence = PresenceBroadcaster::new(registry.clone());
        let rx_dead = register(&registry, 42);
        let mut rx_live = register(&registry, 7);
        drop(rx_dead);

        presence.broadcast_online_users();

        assert!(rx_live.try_recv().is_ok());
    }
}
