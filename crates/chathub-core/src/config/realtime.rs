//! Real-time relay engine configuration.

use serde::{Deserialize, Serialize};

/// Real-time relay engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Outbound frame buffer size per session. A session whose buffer is
    /// full has further frames dropped rather than blocking the hub.
    #[serde(default = "default_session_buffer")]
    pub session_buffer_size: usize,
    /// Maximum accepted inbound payload size in bytes.
    #[serde(default = "default_max_message_bytes")]
    pub max_message_bytes: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            session_buffer_size: default_session_buffer(),
            max_message_bytes: default_max_message_bytes(),
        }
    }
}

fn default_session_buffer() -> usize {
    256
}

fn default_max_message_bytes() -> usize {
    65536
}
