//! Campaign domain module.
//!
//! # Module Structure
//!
//! - `platform`: Target social networks (`Platform`)
//! - `strategy`: Strategy call input and validated output (`CampaignBrief`, `StrategyResponse`)
//! - `image`: Image payloads and per-post image state (`GeneratedImage`, `ImageStatus`)
//! - `model`: Core campaign model (`Campaign`, `Post`)
//! - `merge`: Pure, order-independent updates of a campaign
//! - `phase`: Workflow phase and published snapshot

mod image;
pub mod merge;
mod model;
mod phase;
mod platform;
mod strategy;

// Re-export public API
pub use image::{DEFAULT_IMAGE_MIME_TYPE, GeneratedImage, ImageOutcome, ImageStatus, ImageTicket};
pub use model::{Campaign, Post};
pub use phase::{CampaignSnapshot, GenerationPhase};
pub use platform::Platform;
pub use strategy::{
    CampaignBrief, DEFAULT_AUDIENCE, DEFAULT_TONE, POSTS_PER_CAMPAIGN, PostDraft, StrategyRequest,
    StrategyResponse,
};
