//! Generation phase and the snapshot published to the presentation layer.

use serde::{Deserialize, Serialize};
use strum::Display;

use super::model::Campaign;

/// Coarse progress indicator of the generation workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum GenerationPhase {
    /// Nothing is being generated; a new request is accepted.
    #[default]
    Idle,
    /// The strategy call is in flight.
    DraftingStrategy,
    /// The campaign is published and its image calls are in flight.
    GeneratingImages,
}

impl GenerationPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Everything the presentation layer renders about the current campaign.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSnapshot {
    pub campaign: Option<Campaign>,
    pub phase: GenerationPhase,
    /// User-visible notice left by the last failed generation.
    pub notice: Option<String>,
}
