//! Simulated posting.

use marketmind_core::error::{MarketmindError, Result};

use crate::account_service::SocialAccountService;
use crate::campaign_orchestrator::CampaignOrchestrator;

/// Marks a post as posted if the account for the campaign's platform is connected.
pub async fn publish_post(
    orchestrator: &CampaignOrchestrator,
    accounts: &SocialAccountService,
    post_id: &str,
) -> Result<()> {
    let campaign = orchestrator
        .current_campaign()
        .ok_or_else(|| MarketmindError::not_found("Post", post_id))?;

    accounts.ensure_connected(campaign.platform).await?;
    orchestrator.mark_posted(post_id)?;

    tracing::info!(
        "[publish_post] Post {} marked as posted to {}",
        post_id,
        campaign.platform
    );
    Ok(())
}
