//! Application layer for MarketMind.
//!
//! Coordinates the campaign generation workflow on top of the domain types and
//! the gateway trait from `marketmind-core`.

pub mod account_service;
pub mod campaign_orchestrator;
pub mod publish;

pub use account_service::SocialAccountService;
pub use campaign_orchestrator::{
    CampaignOrchestrator, GENERATION_FAILED_NOTICE, GenerationOutcome, RejectReason,
};
pub use publish::publish_post;
