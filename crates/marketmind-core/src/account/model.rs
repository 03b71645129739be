use serde::{Deserialize, Serialize};

use crate::campaign::Platform;

/// A mock social account the user can "connect" to enable posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialAccount {
    pub platform: Platform,
    /// Display handle, e.g. `@market_mind`.
    pub handle: String,
    #[serde(default)]
    pub connected: bool,
}

impl SocialAccount {
    pub fn new(platform: Platform, handle: impl Into<String>) -> Self {
        Self {
            platform,
            handle: handle.into(),
            connected: false,
        }
    }
}

/// The four built-in MarketMind demo accounts, all disconnected.
pub fn default_accounts() -> Vec<SocialAccount> {
    vec![
        SocialAccount::new(Platform::Instagram, "@market_mind"),
        SocialAccount::new(Platform::LinkedIn, "MarketMind Inc."),
        SocialAccount::new(Platform::Twitter, "@marketmind_ai"),
        SocialAccount::new(Platform::Facebook, "MarketMind AI"),
    ]
}
