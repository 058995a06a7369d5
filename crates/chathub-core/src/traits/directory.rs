//! Identity directory trait for resolving user ids to display names.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::id::UserId;

/// Trait for identity backends (portal REST API or in-memory).
///
/// Resolves a numeric portal identity to a human-readable display name.
/// Implementations fail for non-positive or unknown ids; callers are
/// expected to substitute the guest label on failure rather than refuse
/// the connection.
#[async_trait]
pub trait IdentityDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Look up the display name for a user id.
    async fn resolve(&self, id: UserId) -> AppResult<String>;
}
