//! Strategy call inputs and the validated strategy payload.

use serde::{Deserialize, Serialize};

use super::platform::Platform;
use crate::error::{GenerationStage, MarketmindError, Result};

/// Audience used when the form leaves it empty.
pub const DEFAULT_AUDIENCE: &str = "General Public";
/// Tone used when the form leaves it empty.
pub const DEFAULT_TONE: &str = "Professional";
/// Number of post drafts requested per campaign.
pub const POSTS_PER_CAMPAIGN: usize = 3;

/// Raw form input submitted by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignBrief {
    pub topic: String,
    pub audience: String,
    pub tone: String,
    pub platform: Platform,
}

impl CampaignBrief {
    pub fn new(
        topic: impl Into<String>,
        audience: impl Into<String>,
        tone: impl Into<String>,
        platform: Platform,
    ) -> Self {
        Self {
            topic: topic.into(),
            audience: audience.into(),
            tone: tone.into(),
            platform,
        }
    }

    pub fn has_topic(&self) -> bool {
        !self.topic.trim().is_empty()
    }
}

/// Parameters of one strategy call, with empty fields already defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyRequest {
    pub topic: String,
    pub audience: String,
    pub tone: String,
    pub platform: Platform,
}

impl From<&CampaignBrief> for StrategyRequest {
    fn from(brief: &CampaignBrief) -> Self {
        Self {
            topic: brief.topic.trim().to_string(),
            audience: or_default(&brief.audience, DEFAULT_AUDIENCE),
            tone: or_default(&brief.tone, DEFAULT_TONE),
            platform: brief.platform,
        }
    }
}

fn or_default(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// One post as drafted by the text model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub headline: String,
    pub body: String,
    pub hashtags: Vec<String>,
    pub image_prompt: String,
}

/// Validated result of the strategy call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyResponse {
    pub campaign_title: String,
    pub posts: Vec<PostDraft>,
}

impl StrategyResponse {
    /// Parses and validates the JSON text returned by the text model.
    ///
    /// Every field of the schema is required; an empty body, a missing field,
    /// an empty post list or a draft without an image prompt is rejected.
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(MarketmindError::malformed(
                GenerationStage::Strategy,
                "empty response body",
            ));
        }

        let response: Self = serde_json::from_str(text)
            .map_err(|e| MarketmindError::malformed(GenerationStage::Strategy, e.to_string()))?;
        response.validate()?;
        Ok(response)
    }

    fn validate(&self) -> Result<()> {
        if self.posts.is_empty() {
            return Err(MarketmindError::malformed(
                GenerationStage::Strategy,
                "response contains no posts",
            ));
        }

        if let Some(index) = self
            .posts
            .iter()
            .position(|draft| draft.image_prompt.trim().is_empty())
        {
            return Err(MarketmindError::malformed(
                GenerationStage::Strategy,
                format!("post {} has an empty imagePrompt", index + 1),
            ));
        }

        Ok(())
    }
}
