//! The AI gateway seam.
//!
//! The orchestrator talks to the generative backends only through this trait,
//! so tests substitute scripted implementations.

use crate::campaign::{GeneratedImage, StrategyRequest, StrategyResponse};
use crate::error::Result;

/// Suffix appended to every image prompt before it is sent.
pub const IMAGE_PROMPT_SUFFIX: &str = " high quality, photorealistic, professional photography, 4k";

/// Request/response access to the text and image generation services.
///
/// Implementations perform exactly one remote call per method invocation and
/// never retry.
#[async_trait::async_trait]
pub trait CampaignGateway: Send + Sync {
    /// Drafts a campaign title and post drafts.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the topic is empty
    /// - `MalformedResponse` if the body is empty or violates the schema
    /// - `GenerationFailed` on transport, auth or quota failures
    async fn generate_strategy(&self, request: &StrategyRequest) -> Result<StrategyResponse>;

    /// Generates one image for `prompt` (without [`IMAGE_PROMPT_SUFFIX`]).
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the prompt is empty
    /// - `NoImageReturned` if the response has no inline image part
    /// - `GenerationFailed` on transport, auth or quota failures
    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage>;
}

/// Applies the fixed quality suffix to an image prompt.
pub fn decorate_image_prompt(prompt: &str) -> String {
    format!("{}{}", prompt, IMAGE_PROMPT_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decorate_image_prompt() {
        assert_eq!(
            decorate_image_prompt("A latte on oak"),
            "A latte on oak high quality, photorealistic, professional photography, 4k"
        );
    }
}
