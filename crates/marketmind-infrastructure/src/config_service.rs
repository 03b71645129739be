//! Configuration service implementation.
//!
//! Loads `AppConfig` from `~/.config/marketmind/config.toml`. A missing file
//! yields the defaults.

use std::path::Path;

use marketmind_core::config::AppConfig;
use marketmind_core::error::{MarketmindError, Result};

use crate::paths::MarketmindPaths;

#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    paths: MarketmindPaths,
}

impl ConfigService {
    pub fn new(base_path: Option<&Path>) -> Self {
        Self {
            paths: MarketmindPaths::new(base_path),
        }
    }

    pub fn paths(&self) -> &MarketmindPaths {
        &self.paths
    }

    /// Reads and parses `config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<AppConfig> {
        let path = self
            .paths
            .config_file()
            .map_err(|e| MarketmindError::config(e.to_string()))?;

        if !path.exists() {
            tracing::debug!(
                "[ConfigService] {} not found, using defaults",
                path.display()
            );
            return Ok(AppConfig::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: AppConfig = toml::from_str(&content)?;
        tracing::debug!(
            "[ConfigService] Loaded config from {} (text_model={}, image_model={})",
            path.display(),
            config.gemini.text_model,
            config.gemini.image_model
        );
        Ok(config)
    }
}
