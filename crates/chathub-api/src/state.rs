//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use chathub_core::config::AppConfig;
use chathub_realtime::engine::RelayEngine;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Relay engine driving sessions, presence, and routing.
    pub engine: Arc<RelayEngine>,
    /// Server start time, for uptime reporting.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Assemble the state handed to the router.
    pub fn new(config: Arc<AppConfig>, engine: Arc<RelayEngine>) -> Self {
        Self {
            config,
            engine,
            started_at: Utc::now(),
        }
    }
}
