//! Secret service implementation.
//!
//! Reads the Gemini API key from `secret.json`, with the `GEMINI_API_KEY` and
//! `API_KEY` environment variables taking precedence over the file.

use std::path::Path;
use std::sync::Arc;

use marketmind_core::config::{GeminiConfig, SecretConfig};
use marketmind_core::error::{MarketmindError, Result};
use marketmind_core::secret::SecretService;
use tokio::sync::RwLock;

use crate::paths::MarketmindPaths;

/// Environment variables checked for an API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Service for loading secret configuration.
///
/// The loaded config is cached to avoid repeated file I/O.
///
/// # Example
///
/// ```ignore
/// use marketmind_infrastructure::SecretServiceImpl;
/// use marketmind_core::secret::SecretService;
///
/// let service = SecretServiceImpl::new(None);
/// let secrets = service.load_secrets().await?;
/// ```
#[derive(Clone)]
pub struct SecretServiceImpl {
    paths: MarketmindPaths,
    read_env: bool,
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretServiceImpl {
    pub fn new(base_path: Option<&Path>) -> Self {
        Self {
            paths: MarketmindPaths::new(base_path),
            read_env: true,
            secrets: Arc::new(RwLock::new(None)),
        }
    }

    /// Ignores environment variables and reads the file only.
    pub fn file_only(mut self) -> Self {
        self.read_env = false;
        self
    }

    fn api_key_from_env() -> Option<String> {
        API_KEY_ENV_VARS.iter().find_map(|name| {
            std::env::var(name)
                .ok()
                .filter(|value| !value.trim().is_empty())
        })
    }

    async fn load_from_file(&self) -> Result<SecretConfig> {
        let path = self
            .paths
            .secret_file()
            .map_err(|e| MarketmindError::config(e.to_string()))?;

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                MarketmindError::config(format!(
                    "Failed to parse secret file at {}: {}",
                    path.display(),
                    e
                ))
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("[SecretService] No secret file at {}", path.display());
                Ok(SecretConfig::default())
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        if let Some(cached) = self.secrets.read().await.as_ref() {
            return Ok(cached.clone());
        }

        let mut loaded = self.load_from_file().await?;
        if self.read_env {
            if let Some(api_key) = Self::api_key_from_env() {
                tracing::debug!("[SecretService] Using API key from environment");
                loaded.gemini = Some(GeminiConfig { api_key });
            }
        }

        *self.secrets.write().await = Some(loaded.clone());
        Ok(loaded)
    }

    async fn secret_file_exists(&self) -> bool {
        match self.paths.secret_file() {
            Ok(path) => tokio::fs::try_exists(path).await.unwrap_or(false),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_yields_empty_secrets() {
        let temp_dir = TempDir::new().unwrap();
        let service = SecretServiceImpl::new(Some(temp_dir.path())).file_only();

        assert!(!service.secret_file_exists().await);
        let secrets = service.load_secrets().await.unwrap();
        assert_eq!(secrets.gemini_api_key(), None);
    }

    #[tokio::test]
    async fn test_reads_api_key_from_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("secret.json"),
            r#"{"gemini": {"api_key": "file-key"}}"#,
        )
        .unwrap();
        let service = SecretServiceImpl::new(Some(temp_dir.path())).file_only();

        assert!(service.secret_file_exists().await);
        let secrets = service.load_secrets().await.unwrap();
        assert_eq!(secrets.gemini_api_key(), Some("file-key"));
    }

    #[tokio::test]
    async fn test_secrets_are_cached() {
        let temp_dir = TempDir::new().unwrap();
        let secret_path = temp_dir.path().join("secret.json");
        std::fs::write(&secret_path, r#"{"gemini": {"api_key": "first"}}"#).unwrap();
        let service = SecretServiceImpl::new(Some(temp_dir.path())).file_only();

        service.load_secrets().await.unwrap();
        std::fs::write(&secret_path, r#"{"gemini": {"api_key": "second"}}"#).unwrap();

        let secrets = service.load_secrets().await.unwrap();
        assert_eq!(secrets.gemini_api_key(), Some("first"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("secret.json"), "{not json").unwrap();
        let service = SecretServiceImpl::new(Some(temp_dir.path())).file_only();

        let err = service.load_secrets().await.unwrap_err();
        assert!(err.is_config());
    }
}
