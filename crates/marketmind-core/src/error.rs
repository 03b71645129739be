//! Error types for the MarketMind application.

use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

/// The remote call a generation error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GenerationStage {
    /// The text-generation call producing the campaign strategy.
    Strategy,
    /// The image-generation call producing one post image.
    Image,
}

/// A shared error type for the entire MarketMind application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum MarketmindError {
    /// The text-generation service answered with an empty body or with JSON
    /// that does not match the requested schema.
    #[error("Malformed {stage} response: {message}")]
    MalformedResponse {
        stage: GenerationStage,
        message: String,
    },

    /// The image-generation service answered without an inline image part.
    #[error("No image data returned")]
    NoImageReturned,

    /// Transport, authentication or quota failure of a remote call.
    #[error("{stage} generation failed: {message}")]
    GenerationFailed {
        stage: GenerationStage,
        status_code: Option<u16>,
        message: String,
    },

    /// Caller supplied input the gateway cannot send (empty topic or prompt).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Posting was requested for a platform whose mock account is disconnected.
    #[error("Account for {platform} is not connected")]
    AccountNotConnected { platform: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MarketmindError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a MalformedResponse error
    pub fn malformed(stage: GenerationStage, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            stage,
            message: message.into(),
        }
    }

    /// Creates a GenerationFailed error without an HTTP status
    pub fn generation_failed(stage: GenerationStage, message: impl Into<String>) -> Self {
        Self::GenerationFailed {
            stage,
            status_code: None,
            message: message.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a MalformedResponse error
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Self::MalformedResponse { .. })
    }

    /// Check if this is a NoImageReturned error
    pub fn is_no_image_returned(&self) -> bool {
        matches!(self, Self::NoImageReturned)
    }

    /// Check if this is a GenerationFailed error
    pub fn is_generation_failed(&self) -> bool {
        matches!(self, Self::GenerationFailed { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns the generation stage for errors raised by a remote call.
    pub fn stage(&self) -> Option<GenerationStage> {
        match self {
            Self::MalformedResponse { stage, .. } | Self::GenerationFailed { stage, .. } => {
                Some(*stage)
            }
            Self::NoImageReturned => Some(GenerationStage::Image),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for MarketmindError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for MarketmindError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for MarketmindError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, MarketmindError>`.
pub type Result<T> = std::result::Result<T, MarketmindError>;
