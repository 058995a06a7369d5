//! Response DTOs.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use chathub_core::types::id::UserId;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Uptime.
    pub uptime_seconds: i64,
    /// Registered sessions.
    pub active_sessions: usize,
    /// Distinct identified users online.
    pub online_users: usize,
}

/// Online-user listing, mirroring the `ONLINE_USERS` frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineUsersResponse {
    /// Sorted distinct identified user ids.
    #[serde(rename = "activeIds")]
    pub active_ids: BTreeSet<UserId>,
}
