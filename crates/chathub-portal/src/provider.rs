//! Provider selection for the identity directory and the message store.

use std::sync::Arc;

use tracing::info;

use chathub_core::config::portal::PortalConfig;
use chathub_core::error::AppError;
use chathub_core::result::AppResult;
use chathub_core::traits::directory::IdentityDirectory;
use chathub_core::traits::store::MessageStore;
use chathub_core::types::id::UserId;

use crate::directory::PortalDirectory;
use crate::memory::{MemoryDirectory, MemoryMessageStore};
use crate::store::PortalMessageStore;

/// Build the configured identity directory provider.
pub fn build_directory(config: &PortalConfig) -> AppResult<Arc<dyn IdentityDirectory>> {
    match config.provider.as_str() {
        "portal" => {
            info!(base_url = %config.base_url, "Initializing portal identity directory");
            Ok(Arc::new(PortalDirectory::new(config)?))
        }
        "memory" => {
            info!(seeded = config.seed.len(), "Initializing in-memory identity directory");
            let directory = MemoryDirectory::new();
            for entry in &config.seed {
                directory.insert(UserId::new(entry.id), entry.name.clone());
            }
            Ok(Arc::new(directory))
        }
        other => Err(AppError::configuration(format!(
            "Unknown portal provider: '{other}'. Supported: portal, memory"
        ))),
    }
}

/// Build the configured message store provider.
pub fn build_message_store(config: &PortalConfig) -> AppResult<Arc<dyn MessageStore>> {
    match config.provider.as_str() {
        "portal" => {
            info!(base_url = %config.base_url, "Initializing portal message store");
            Ok(Arc::new(PortalMessageStore::new(config)?))
        }
        "memory" => {
            info!("Initializing in-memory message store");
            Ok(Arc::new(MemoryMessageStore::new()))
        }
        other => Err(AppError::configuration(format!(
            "Unknown portal provider: '{other}'. Supported: portal, memory"
        ))),
    }
}
