//! Campaign domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::image::{GeneratedImage, ImageStatus, ImageTicket};
use super::platform::Platform;
use super::strategy::{PostDraft, StrategyRequest, StrategyResponse};

/// One social-media content unit within a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique identifier, never reused within a session.
    pub id: String,
    pub headline: String,
    pub body: String,
    pub hashtags: Vec<String>,
    /// Prompt sent to the image model. Fixed at creation.
    pub image_prompt: String,
    pub image_status: ImageStatus,
    /// Once true, never reset.
    pub posted: bool,
}

impl Post {
    /// Creates a post from a draft with its first image call already in flight.
    pub fn from_draft(draft: PostDraft, ticket: ImageTicket) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            headline: draft.headline,
            body: draft.body,
            hashtags: draft.hashtags,
            image_prompt: draft.image_prompt,
            image_status: ImageStatus::Generating {
                ticket,
                previous: None,
            },
            posted: false,
        }
    }

    pub fn is_generating_image(&self) -> bool {
        matches!(self.image_status, ImageStatus::Generating { .. })
    }

    /// The image currently shown for this post.
    ///
    /// While a regeneration is in flight this is the previous image, if any.
    pub fn image(&self) -> Option<&GeneratedImage> {
        match &self.image_status {
            ImageStatus::Absent => None,
            ImageStatus::Generating { previous, .. } => previous.as_ref(),
            ImageStatus::Ready { image } => Some(image),
        }
    }

    /// The ticket this post is waiting for, if an image call is in flight.
    pub fn pending_ticket(&self) -> Option<ImageTicket> {
        match self.image_status {
            ImageStatus::Generating { ticket, .. } => Some(ticket),
            _ => None,
        }
    }

    /// Text placed on the clipboard by "copy": headline, body and hashtags
    /// separated by blank lines.
    pub fn share_text(&self) -> String {
        format!(
            "{}\n\n{}\n\n{}",
            self.headline,
            self.body,
            self.hashtags.join(" ")
        )
    }
}

/// One generated marketing strategy bundle.
///
/// Post membership is fixed at creation; only image fields and the posted
/// flag of individual posts change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub title: String,
    /// The topic the campaign was generated for.
    pub description: String,
    /// Audience the strategy was written for. An empty form value is stored
    /// as the default ("General Public") that was sent to the text model.
    pub target_audience: String,
    pub platform: Platform,
    pub posts: Vec<Post>,
    pub created_at: DateTime<Utc>,
}

impl Campaign {
    /// Builds a campaign from a strategy result.
    ///
    /// `next_ticket` is called once per draft, in draft order.
    pub fn from_strategy(
        request: &StrategyRequest,
        strategy: StrategyResponse,
        mut next_ticket: impl FnMut() -> ImageTicket,
    ) -> Self {
        let posts = strategy
            .posts
            .into_iter()
            .map(|draft| Post::from_draft(draft, next_ticket()))
            .collect();

        Self {
            id: Uuid::new_v4().to_string(),
            title: strategy.campaign_title,
            description: request.topic.clone(),
            target_audience: request.audience.clone(),
            platform: request.platform,
            posts,
            created_at: Utc::now(),
        }
    }

    pub fn post(&self, post_id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == post_id)
    }

    /// True while any post still has an image call in flight.
    pub fn has_pending_images(&self) -> bool {
        self.posts.iter().any(Post::is_generating_image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::strategy::CampaignBrief;

    fn draft(n: usize) -> PostDraft {
        PostDraft {
            headline: format!("Headline {n}"),
            body: format!("Body {n}"),
            hashtags: vec![format!("#tag{n}"), "#launch".to_string()],
            image_prompt: format!("Prompt {n}"),
        }
    }

    fn strategy() -> StrategyResponse {
        StrategyResponse {
            campaign_title: "Cold Brew Summer".to_string(),
            posts: (1..=3).map(draft).collect(),
        }
    }

    #[test]
    fn test_from_strategy_builds_pending_posts() {
        let brief = CampaignBrief::new("Organic cold brew launch", "", "", Platform::Instagram);
        let request = StrategyRequest::from(&brief);
        let mut counter = 0;
        let campaign = Campaign::from_strategy(&request, strategy(), || {
            counter += 1;
            ImageTicket(counter)
        });

        assert_eq!(campaign.title, "Cold Brew Summer");
        assert_eq!(campaign.description, "Organic cold brew launch");
        assert_eq!(campaign.target_audience, "General Public");
        assert_eq!(campaign.posts.len(), 3);
        for (index, post) in campaign.posts.iter().enumerate() {
            assert!(post.is_generating_image());
            assert!(post.image().is_none());
            assert!(!post.posted);
            assert_eq!(post.pending_ticket(), Some(ImageTicket(index as u64 + 1)));
        }
        assert!(campaign.has_pending_images());
    }

    #[test]
    fn test_post_ids_are_unique() {
        let request = StrategyRequest::from(&CampaignBrief::new("t", "", "", Platform::Twitter));
        let campaign = Campaign::from_strategy(&request, strategy(), || ImageTicket(0));

        let mut ids: Vec<&str> = campaign.posts.iter().map(|p| p.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
        assert_ne!(campaign.id, campaign.posts[0].id);
    }

    #[test]
    fn test_share_text_layout() {
        let post = Post::from_draft(draft(1), ImageTicket(1));
        assert_eq!(post.share_text(), "Headline 1\n\nBody 1\n\n#tag1 #launch");
    }

    #[test]
    fn test_image_while_regenerating_is_previous() {
        let mut post = Post::from_draft(draft(1), ImageTicket(1));
        let image = GeneratedImage::new("image/png", "QUJD");
        post.image_status = ImageStatus::Generating {
            ticket: ImageTicket(2),
            previous: Some(image.clone()),
        };

        assert!(post.is_generating_image());
        assert_eq!(post.image(), Some(&image));
    }
}
