use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use marketmind_application::{
    CampaignOrchestrator, GenerationOutcome, RejectReason, SocialAccountService, publish_post,
};
use marketmind_core::campaign::{
    Campaign, CampaignBrief, CampaignSnapshot, GenerationPhase, Platform, Post,
};
use marketmind_infrastructure::{ConfigService, SecretServiceImpl};
use marketmind_interaction::GeminiApiGateway;
use tokio::sync::watch;

#[derive(Args)]
pub struct GenerateArgs {
    /// Product or topic the campaign is about
    #[arg(long)]
    topic: String,

    /// Target audience (defaults to "General Public")
    #[arg(long, default_value = "")]
    audience: String,

    /// Tone of voice (defaults to "Professional")
    #[arg(long, default_value = "")]
    tone: String,

    /// Instagram, LinkedIn, Twitter or Facebook
    #[arg(long, default_value_t = Platform::Instagram)]
    platform: Platform,

    /// Write generated images into this directory
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Print the campaign as JSON
    #[arg(long)]
    json: bool,

    /// Connect the platform account and mark every post as posted
    #[arg(long)]
    publish: bool,
}

pub async fn run(
    args: GenerateArgs,
    config_service: &ConfigService,
    config_dir: Option<&Path>,
) -> Result<()> {
    let config = config_service.load()?;
    let secrets = SecretServiceImpl::new(config_dir);
    let gateway = GeminiApiGateway::from_secrets(&secrets, &config.gemini).await?;

    let orchestrator = CampaignOrchestrator::new(Arc::new(gateway));
    let accounts = SocialAccountService::new(config.accounts);
    let brief = CampaignBrief::new(args.topic, args.audience, args.tone, args.platform);

    let outcome = tokio::select! {
        outcome = orchestrator.generate(brief) => outcome,
        () = report_progress(orchestrator.subscribe()) => {
            anyhow::bail!("campaign state channel closed unexpectedly")
        }
    };

    match outcome {
        Ok(GenerationOutcome::Completed(_)) => {}
        Ok(GenerationOutcome::Rejected(RejectReason::EmptyTopic)) => {
            anyhow::bail!("--topic must not be empty")
        }
        Ok(GenerationOutcome::Rejected(RejectReason::Busy(phase))) => {
            anyhow::bail!("a generation is already running ({phase})")
        }
        Err(err) => {
            if let Some(notice) = orchestrator.snapshot().notice {
                eprintln!("{}", notice.red());
            }
            return Err(err.into());
        }
    }

    let campaign = orchestrator
        .current_campaign()
        .context("generation completed without a campaign")?;

    if args.publish {
        accounts.set_connected(campaign.platform, true).await?;
        for post in &campaign.posts {
            publish_post(&orchestrator, &accounts, &post.id).await?;
        }
    }

    let campaign = orchestrator.current_campaign().unwrap_or(campaign);

    let mut saved = Vec::new();
    if let Some(dir) = &args.out_dir {
        saved = write_images(&campaign, dir)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&campaign)?);
    } else {
        print_campaign(&campaign, &saved);
    }

    Ok(())
}

/// Streams phase changes and image progress to stderr until the channel closes.
async fn report_progress(mut updates: watch::Receiver<CampaignSnapshot>) {
    let mut last_phase = updates.borrow_and_update().phase;
    let mut last_settled = 0;

    while updates.changed().await.is_ok() {
        let snapshot = updates.borrow_and_update().clone();

        if snapshot.phase != last_phase {
            last_phase = snapshot.phase;
            match last_phase {
                GenerationPhase::DraftingStrategy => {
                    eprintln!("{} Drafting campaign strategy...", "▸".cyan())
                }
                GenerationPhase::GeneratingImages => {
                    eprintln!("{} Generating images...", "▸".cyan())
                }
                GenerationPhase::Idle => {}
            }
        }

        if let Some(campaign) = &snapshot.campaign {
            let settled = campaign
                .posts
                .iter()
                .filter(|post| !post.is_generating_image())
                .count();
            if settled > last_settled {
                eprintln!(
                    "  {} {}/{} images settled",
                    "✓".green(),
                    settled,
                    campaign.posts.len()
                );
            }
            last_settled = settled;
        }
    }
}

fn write_images(campaign: &Campaign, dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut saved = Vec::new();
    for post in &campaign.posts {
        let Some(image) = post.image() else {
            continue;
        };
        let path = dir.join(format!("{}.{}", post.id, image.file_extension()));
        std::fs::write(&path, image.decode()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        saved.push((post.id.clone(), path));
    }
    Ok(saved)
}

fn print_campaign(campaign: &Campaign, saved: &[(String, PathBuf)]) {
    println!();
    println!("{}", campaign.title.bold());
    println!(
        "{} · {} · {}",
        campaign.platform, campaign.target_audience, campaign.description
    );

    for (index, post) in campaign.posts.iter().enumerate() {
        println!();
        println!("{}", format!("── Post {} ──", index + 1).cyan());
        println!("{}", post.share_text());
        println!("{}", image_line(post, saved).dimmed());
        if post.posted {
            println!("{}", format!("Posted to {}", campaign.platform).green());
        }
    }
}

fn image_line(post: &Post, saved: &[(String, PathBuf)]) -> String {
    let saved_path = saved
        .iter()
        .find(|(post_id, _)| post_id == &post.id)
        .map(|(_, path)| path);

    match (post.image(), saved_path) {
        (Some(_), Some(path)) => format!("image: {}", path.display()),
        (Some(image), None) => format!("image: {} (use --out-dir to save)", image.mime_type),
        (None, _) => "image: not generated".to_string(),
    }
}
