//! Unified path management for marketmind configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/marketmind/        # Config directory
//! ├── config.toml              # Models, endpoint, mock accounts
//! └── secret.json              # API keys
//! ```

use std::path::{Path, PathBuf};

use marketmind_core::config::{GeminiConfig, SecretConfig};

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Path resolution rooted either at the platform config directory or at an
/// explicit base directory (used by tests).
#[derive(Debug, Clone, Default)]
pub struct MarketmindPaths {
    base: Option<PathBuf>,
}

impl MarketmindPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the marketmind configuration directory.
    ///
    /// - `Ok(PathBuf)`: e.g. `~/.config/marketmind/`, or the base directory
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join("marketmind"))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    /// Returns the path to the main configuration file.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    /// Ensures the secret file exists, creating it with a template if it doesn't.
    ///
    /// On Unix the file permissions are set to 600 (user read/write only).
    pub fn ensure_secret_file(&self) -> Result<PathBuf, std::io::Error> {
        let secret_path = self
            .secret_file()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;

        if secret_path.exists() {
            return Ok(secret_path);
        }

        if let Some(parent) = secret_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template_config = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: String::new(),
            }),
        };

        let template_json = serde_json::to_string_pretty(&template_config)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        std::fs::write(&secret_path, template_json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&secret_path, permissions)?;
        }

        Ok(secret_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_dir() {
        if let Ok(config_dir) = MarketmindPaths::default().config_dir() {
            assert!(config_dir.ends_with("marketmind"));
        }
    }

    #[test]
    fn test_files_live_under_base() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MarketmindPaths::new(Some(temp_dir.path()));

        let config_file = paths.config_file().unwrap();
        let secret_file = paths.secret_file().unwrap();

        assert!(config_file.ends_with("config.toml"));
        assert!(secret_file.ends_with("secret.json"));
        assert!(config_file.starts_with(temp_dir.path()));
        assert!(secret_file.starts_with(temp_dir.path()));
    }

    #[test]
    fn test_ensure_secret_file_writes_template_once() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MarketmindPaths::new(Some(&temp_dir.path().join("nested")));

        let path = paths.ensure_secret_file().unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: SecretConfig = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.gemini_api_key(), None);

        std::fs::write(&path, r#"{"gemini": {"api_key": "kept"}}"#).unwrap();
        paths.ensure_secret_file().unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("kept"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }
}
