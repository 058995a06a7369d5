//! The shared registry of live connection sessions.

use std::sync::Arc;

use parking_lot::RwLock;

use chathub_core::error::AppError;
use chathub_core::result::AppResult;
use chathub_core::types::id::SessionId;

use super::handle::Session;

/// Concurrent, insertion-ordered set of all open sessions.
///
/// A single lock guards the underlying list. The lock is held only for
/// the registry's own bookkeeping and never across a send: fan-out code
/// takes a [`snapshot`](Self::snapshot) and releases the lock before
/// queueing any frames.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<Vec<Arc<Session>>>,
}

impl SessionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(Vec::new()),
        }
    }

    /// Insert a newly opened session.
    ///
    /// A session id that is already present indicates a lifecycle-ordering
    /// bug; the insert is refused so the offending connection can be
    /// isolated while the existing entry stays untouched.
    pub fn add(&self, session: Arc<Session>) -> AppResult<()> {
        let mut sessions = self.sessions.write();
        if sessions.iter().any(|s| s.id == session.id) {
            return Err(AppError::duplicate_session(format!(
                "session {} is already registered",
                session.id
            )));
        }
        sessions.push(session);
        Ok(())
    }

    /// Remove a session by id, returning it if it was present.
    ///
    /// Absent ids are a no-op: the close and error paths of one
    /// connection may race for the same removal.
    pub fn remove(&self, id: SessionId) -> Option<Arc<Session>> {
        let mut sessions = self.sessions.write();
        let pos = sessions.iter().position(|s| s.id == id)?;
        Some(sessions.remove(pos))
    }

    /// Point-in-time copy of the registered sessions, in registration
    /// order. Callers iterate the copy with no lock held.
    pub fn snapshot(&self) -> Vec<Arc<Session>> {
        self.sessions.read().clone()
    }

    /// Number of currently registered sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Whether the registry has no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Empty the registry, marking every session closed. Used at shutdown.
    pub fn drain(&self) -> Vec<Arc<Session>> {
        let mut sessions = self.sessions.write();
        let drained: Vec<Arc<Session>> = sessions.drain(..).collect();
        for session in &drained {
            session.mark_closed();
        }
        drained
    }
}
