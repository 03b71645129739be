//! Campaign generation workflow.
//!
//! `CampaignOrchestrator` owns the current campaign and generation phase. It
//! issues the strategy call, publishes the campaign with every image pending,
//! fans out one image call per post and merges each completion into the
//! campaign by post id. Subscribers observe every change through a
//! `tokio::sync::watch` channel.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::future::join_all;
use marketmind_core::campaign::merge;
use marketmind_core::campaign::{
    Campaign, CampaignBrief, CampaignSnapshot, GenerationPhase, ImageOutcome, ImageTicket,
    StrategyRequest,
};
use marketmind_core::error::{MarketmindError, Result};
use marketmind_core::gateway::CampaignGateway;
use tokio::sync::watch;

/// Notice shown to the user when the strategy call fails.
pub const GENERATION_FAILED_NOTICE: &str =
    "Failed to generate campaign. Please ensure your API key is set correctly.";

/// Why a generate request was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The topic was empty.
    EmptyTopic,
    /// Another generation is still running.
    Busy(GenerationPhase),
}

/// Result of a generate request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The campaign as it stands once every image call has settled.
    Completed(Campaign),
    /// The request was a no-op.
    Rejected(RejectReason),
}

/// Puts the phase back to `Idle` when a generation ends, including when the
/// `generate` future is dropped before it completes.
struct IdleOnDrop<'a> {
    state: &'a watch::Sender<CampaignSnapshot>,
}

impl Drop for IdleOnDrop<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|state| {
            if state.phase.is_idle() {
                return false;
            }
            state.phase = GenerationPhase::Idle;
            true
        });
    }
}

/// Drives campaign generation and owns the resulting state.
pub struct CampaignOrchestrator {
    gateway: Arc<dyn CampaignGateway>,
    state: watch::Sender<CampaignSnapshot>,
    next_ticket: AtomicU64,
}

impl CampaignOrchestrator {
    pub fn new(gateway: Arc<dyn CampaignGateway>) -> Self {
        let (state, _) = watch::channel(CampaignSnapshot::default());
        Self {
            gateway,
            state,
            next_ticket: AtomicU64::new(1),
        }
    }

    /// Receives a new snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<CampaignSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> CampaignSnapshot {
        self.state.borrow().clone()
    }

    pub fn phase(&self) -> GenerationPhase {
        self.state.borrow().phase
    }

    pub fn current_campaign(&self) -> Option<Campaign> {
        self.state.borrow().campaign.clone()
    }

    fn issue_ticket(&self) -> ImageTicket {
        ImageTicket(self.next_ticket.fetch_add(1, Ordering::Relaxed))
    }

    /// Runs the full workflow: strategy call, campaign publication, then all
    /// image calls concurrently.
    ///
    /// Returns `Rejected` without side effects if the topic is empty or a
    /// generation is already running. Image failures never fail the call; the
    /// affected post simply ends up without an image.
    ///
    /// Dropping the returned future returns the phase to `Idle`; image calls
    /// already merged stay merged.
    ///
    /// # Errors
    ///
    /// Returns the gateway error if the strategy call fails. The previous
    /// campaign is kept, the phase returns to `Idle` and the snapshot carries
    /// [`GENERATION_FAILED_NOTICE`].
    pub async fn generate(&self, brief: CampaignBrief) -> Result<GenerationOutcome> {
        if !brief.has_topic() {
            tracing::debug!("[CampaignOrchestrator] Ignoring generate request with empty topic");
            return Ok(GenerationOutcome::Rejected(RejectReason::EmptyTopic));
        }

        let mut busy_phase = None;
        self.state.send_if_modified(|state| {
            if state.phase.is_idle() {
                state.phase = GenerationPhase::DraftingStrategy;
                state.notice = None;
                true
            } else {
                busy_phase = Some(state.phase);
                false
            }
        });
        if let Some(phase) = busy_phase {
            tracing::debug!(
                "[CampaignOrchestrator] Ignoring generate request while {}",
                phase
            );
            return Ok(GenerationOutcome::Rejected(RejectReason::Busy(phase)));
        }
        let idle_guard = IdleOnDrop { state: &self.state };

        let request = StrategyRequest::from(&brief);
        tracing::info!(
            "[CampaignOrchestrator] Drafting strategy: platform={}, audience={}, tone={}",
            request.platform,
            request.audience,
            request.tone
        );

        let strategy = match self.gateway.generate_strategy(&request).await {
            Ok(strategy) => strategy,
            Err(err) => {
                tracing::error!("[CampaignOrchestrator] Campaign generation failed: {}", err);
                self.state.send_modify(|state| {
                    state.phase = GenerationPhase::Idle;
                    state.notice = Some(GENERATION_FAILED_NOTICE.to_string());
                });
                return Err(err);
            }
        };

        let campaign = Campaign::from_strategy(&request, strategy, || self.issue_ticket());
        let jobs: Vec<(String, String, ImageTicket)> = campaign
            .posts
            .iter()
            .filter_map(|post| {
                post.pending_ticket()
                    .map(|ticket| (post.id.clone(), post.image_prompt.clone(), ticket))
            })
            .collect();

        tracing::info!(
            "[CampaignOrchestrator] Campaign {} ('{}') published, generating {} images",
            campaign.id,
            campaign.title,
            jobs.len()
        );
        self.state.send_modify(|state| {
            state.campaign = Some(campaign);
            state.phase = GenerationPhase::GeneratingImages;
        });

        let results = join_all(
            jobs.iter()
                .map(|(post_id, prompt, ticket)| self.run_image_call(post_id, prompt, *ticket)),
        )
        .await;
        let failed = results.iter().filter(|result| result.is_err()).count();

        drop(idle_guard);
        tracing::info!(
            "[CampaignOrchestrator] Image generation settled: {} succeeded, {} failed",
            results.len() - failed,
            failed
        );

        self.current_campaign()
            .map(GenerationOutcome::Completed)
            .ok_or_else(|| MarketmindError::internal("campaign vanished during generation"))
    }

    /// Generates a new image for one post, independent of the current phase.
    ///
    /// The post keeps showing its current image until the call settles. A newer
    /// regenerate for the same post supersedes this one.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the current campaign has no such post
    /// - the gateway error if the image call fails (after the post has been
    ///   reset to its previous image)
    pub async fn regenerate_image(&self, post_id: &str) -> Result<()> {
        let ticket = self.issue_ticket();
        let mut prompt = None;

        self.state.send_if_modified(|state| {
            let Some(campaign) = state.campaign.as_ref() else {
                return false;
            };
            let Some(next) = merge::begin_image_generation(campaign, post_id, ticket) else {
                return false;
            };
            prompt = next.post(post_id).map(|post| post.image_prompt.clone());
            state.campaign = Some(next);
            true
        });

        let prompt = prompt.ok_or_else(|| MarketmindError::not_found("Post", post_id))?;
        tracing::info!("[CampaignOrchestrator] Regenerating image for post {}", post_id);
        self.run_image_call(post_id, &prompt, ticket).await
    }

    /// Marks a post as posted. Idempotent.
    ///
    /// Checking that the platform account is connected is the caller's job.
    pub fn mark_posted(&self, post_id: &str) -> Result<()> {
        let mut found = false;
        self.state.send_if_modified(|state| {
            let Some(campaign) = state.campaign.as_ref() else {
                return false;
            };
            let Some(next) = merge::mark_posted(campaign, post_id) else {
                return false;
            };
            found = true;
            let changed = campaign != &next;
            state.campaign = Some(next);
            changed
        });

        if found {
            Ok(())
        } else {
            Err(MarketmindError::not_found("Post", post_id))
        }
    }

    /// Clipboard text for a post.
    pub fn share_text(&self, post_id: &str) -> Result<String> {
        self.state
            .borrow()
            .campaign
            .as_ref()
            .and_then(|campaign| campaign.post(post_id))
            .map(|post| post.share_text())
            .ok_or_else(|| MarketmindError::not_found("Post", post_id))
    }

    /// Issues one image call and merges its outcome into the post it was
    /// dispatched for. Returns the gateway error, if any, after merging.
    async fn run_image_call(&self, post_id: &str, prompt: &str, ticket: ImageTicket) -> Result<()> {
        let (outcome, result) = match self.gateway.generate_image(prompt).await {
            Ok(image) => (ImageOutcome::Generated(image), Ok(())),
            Err(err) => {
                tracing::warn!(
                    "[CampaignOrchestrator] Failed to generate image for post {}: {}",
                    post_id,
                    err
                );
                (ImageOutcome::Failed, Err(err))
            }
        };

        self.state.send_if_modified(|state| {
            let Some(campaign) = state.campaign.as_ref() else {
                return false;
            };
            if !merge::accepts_image_result(campaign, post_id, ticket) {
                tracing::debug!(
                    "[CampaignOrchestrator] Discarding superseded image result for post {} (ticket {})",
                    post_id,
                    ticket.0
                );
                return false;
            }
            state.campaign = Some(merge::merge_image_result(campaign, post_id, ticket, outcome));
            true
        });

        result
    }
}
