//! Generated image payloads and the per-post image lifecycle.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{MarketmindError, Result};

/// MIME type assumed when the image service omits one.
pub const DEFAULT_IMAGE_MIME_TYPE: &str = "image/png";

/// Binary image data returned by the image-generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub mime_type: String,
    /// Base64-encoded image bytes.
    pub base64: String,
}

impl GeneratedImage {
    pub fn new(mime_type: impl Into<String>, base64: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            base64: base64.into(),
        }
    }

    /// Renders the image as a `data:` URI suitable for an `<img src>`.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }

    /// Decodes the base64 payload into raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        BASE64_STANDARD
            .decode(self.base64.as_bytes())
            .map_err(|e| MarketmindError::Serialization {
                format: "base64".to_string(),
                message: e.to_string(),
            })
    }

    /// File extension matching the MIME subtype (`image/jpeg` -> `jpeg`).
    pub fn file_extension(&self) -> &str {
        self.mime_type
            .split_once('/')
            .map(|(_, subtype)| subtype)
            .filter(|subtype| !subtype.is_empty())
            .unwrap_or("png")
    }
}

/// Identifies one image dispatch.
///
/// Tickets increase monotonically within an orchestrator and are never reused,
/// so a completion can be matched against the dispatch a post is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ImageTicket(pub u64);

/// Image state of a post.
///
/// Exactly one of "in flight", "present" or "absent" holds at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ImageStatus {
    /// No image and nothing in flight.
    Absent,
    /// An image call is in flight.
    Generating {
        ticket: ImageTicket,
        /// Image shown until the call settles (kept on failure).
        previous: Option<GeneratedImage>,
    },
    /// A generated image is present.
    Ready { image: GeneratedImage },
}

/// How a dispatched image call settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    Generated(GeneratedImage),
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri() {
        let image = GeneratedImage::new("image/jpeg", "QUJD");
        assert_eq!(image.data_uri(), "data:image/jpeg;base64,QUJD");
    }

    #[test]
    fn test_decode() {
        let image = GeneratedImage::new("image/png", "QUJD");
        assert_eq!(image.decode().unwrap(), b"ABC".to_vec());
    }

    #[test]
    fn test_decode_rejects_invalid_base64() {
        let image = GeneratedImage::new("image/png", "not base64!!");
        assert!(image.decode().is_err());
    }

    #[test]
    fn test_file_extension_falls_back_to_png() {
        assert_eq!(GeneratedImage::new("image/webp", "").file_extension(), "webp");
        assert_eq!(GeneratedImage::new("garbage", "").file_extension(), "png");
        assert_eq!(GeneratedImage::new("image/", "").file_extension(), "png");
    }
}
