//! Configuration types.
//!
//! `AppConfig` is read from `config.toml`, `SecretConfig` from `secret.json`.

use serde::{Deserialize, Serialize};

use crate::account::{SocialAccount, default_accounts};

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub gemini: GeminiSettings,
    #[serde(default = "default_accounts")]
    pub accounts: Vec<SocialAccount>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gemini: GeminiSettings::default(),
            accounts: default_accounts(),
        }
    }
}

/// Non-secret Gemini settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GeminiSettings {
    #[serde(default = "default_text_model")]
    pub text_model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            text_model: default_text_model(),
            image_model: default_image_model(),
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_text_model() -> String {
    DEFAULT_TEXT_MODEL.to_string()
}

fn default_image_model() -> String {
    DEFAULT_IMAGE_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Root of `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API credentials
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
}

impl SecretConfig {
    /// The configured Gemini API key, ignoring blank placeholders.
    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini
            .as_ref()
            .map(|gemini| gemini.api_key.trim())
            .filter(|key| !key.is_empty())
    }
}
