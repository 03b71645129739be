//! Mock social account connections.
//!
//! Connection state lives in memory only; toggling an account has no backing
//! integration. Posting is gated on the campaign platform's account.

use marketmind_core::account::{SocialAccount, default_accounts};
use marketmind_core::campaign::Platform;
use marketmind_core::error::{MarketmindError, Result};
use tokio::sync::RwLock;

pub struct SocialAccountService {
    accounts: RwLock<Vec<SocialAccount>>,
}

impl SocialAccountService {
    pub fn new(accounts: Vec<SocialAccount>) -> Self {
        Self {
            accounts: RwLock::new(accounts),
        }
    }

    pub async fn list(&self) -> Vec<SocialAccount> {
        self.accounts.read().await.clone()
    }

    /// Flips the connection state of the account for `platform`.
    pub async fn toggle(&self, platform: Platform) -> Result<SocialAccount> {
        self.update(platform, |account| account.connected = !account.connected)
            .await
    }

    pub async fn set_connected(&self, platform: Platform, connected: bool) -> Result<SocialAccount> {
        self.update(platform, |account| account.connected = connected)
            .await
    }

    pub async fn is_connected(&self, platform: Platform) -> bool {
        self.accounts
            .read()
            .await
            .iter()
            .any(|account| account.platform == platform && account.connected)
    }

    /// Fails with `AccountNotConnected` unless the account for `platform` is connected.
    pub async fn ensure_connected(&self, platform: Platform) -> Result<()> {
        if self.is_connected(platform).await {
            Ok(())
        } else {
            Err(MarketmindError::AccountNotConnected {
                platform: platform.to_string(),
            })
        }
    }

    async fn update<F>(&self, platform: Platform, apply: F) -> Result<SocialAccount>
    where
        F: FnOnce(&mut SocialAccount),
    {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .iter_mut()
            .find(|account| account.platform == platform)
            .ok_or_else(|| MarketmindError::not_found("SocialAccount", platform.to_string()))?;

        apply(account);
        tracing::info!(
            "[SocialAccountService] {} ({}) connected={}",
            account.platform,
            account.handle,
            account.connected
        );
        Ok(account.clone())
    }
}

impl Default for SocialAccountService {
    fn default() -> Self {
        Self::new(default_accounts())
    }
}
