//! Identity directory backed by the portal's user-accounts API.

use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;
use tracing::debug;

use chathub_core::config::portal::PortalConfig;
use chathub_core::error::{AppError, ErrorKind};
use chathub_core::result::AppResult;
use chathub_core::traits::directory::IdentityDirectory;
use chathub_core::types::id::UserId;

/// Shape of the portal user-account payload; only the display name is
/// read.
#[derive(Debug, Deserialize)]
struct UserAccount {
    name: String,
}

/// Resolves display names through
/// `GET {base}/o/headless-admin-user/v1.0/user-accounts/{id}`.
///
/// Successful lookups are cached for the life of the process.
#[derive(Debug)]
pub struct PortalDirectory {
    client: reqwest::Client,
    base_url: String,
    username: Option<String>,
    password: Option<String>,
    cache: DashMap<UserId, String>,
}

impl PortalDirectory {
    /// Build a directory client from portal configuration.
    pub fn new(config: &PortalConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build portal HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
            cache: DashMap::new(),
        })
    }

    fn account_url(&self, id: UserId) -> String {
        format!(
            "{}/o/headless-admin-user/v1.0/user-accounts/{id}",
            self.base_url
        )
    }
}

#[async_trait]
impl IdentityDirectory for PortalDirectory {
    async fn resolve(&self, id: UserId) -> AppResult<String> {
        if !id.is_identified() {
            return Err(AppError::identity_lookup(format!(
                "non-positive user id {id}"
            )));
        }
        if let Some(name) = self.cache.get(&id).map(|entry| entry.value().clone()) {
            return Ok(name);
        }

        let mut request = self.client.get(self.account_url(id));
        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_deref());
        }

        let response = request.send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::IdentityLookup,
                format!("user-accounts request for {id} failed"),
                e,
            )
        })?;
        if !response.status().is_success() {
            return Err(AppError::identity_lookup(format!(
                "user-accounts request for {id} returned {}",
                response.status()
            )));
        }

        let account: UserAccount = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::IdentityLookup,
                format!("unreadable user-account body for {id}"),
                e,
            )
        })?;

        self.cache.insert(id, account.name.clone());
        debug!(user_id = %id, name = %account.name, "Resolved display name");
        Ok(account.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory(base_url: &str) -> PortalDirectory {
        let config = PortalConfig {
            provider: "portal".to_string(),
            base_url: base_url.to_string(),
            ..PortalConfig::default()
        };
        PortalDirectory::new(&config).expect("build")
    }

    #[test]
    fn test_account_url_strips_trailing_slash() {
        let dir = directory("https://portal.example.com/");
        assert_eq!(
            dir.account_url(UserId::new(42)),
            "https://portal.example.com/o/headless-admin-user/v1.0/user-accounts/42"
        );
    }

    #[tokio::test]
    async fn test_non_positive_id_fails_without_a_request() {
        let dir = directory("https://portal.invalid");
        let err = dir.resolve(UserId::GUEST).await.expect_err("guest");
        assert_eq!(err.kind, ErrorKind::IdentityLookup);
    }

    #[tokio::test]
    async fn test_cache_hit_skips_the_portal() {
        let dir = directory("https://portal.invalid");
        dir.cache.insert(UserId::new(42), "Ana Torres".to_string());

        // Would otherwise try to reach an unresolvable host.
        let name = dir.resolve(UserId::new(42)).await.expect("cached");
        assert_eq!(name, "Ana Torres");
    }
}
