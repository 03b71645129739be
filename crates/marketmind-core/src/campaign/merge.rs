//! Pure state transitions on a campaign.
//!
//! Every function derives a new `Campaign` from the previous one and touches at
//! most one post, identified by id. Applied in any order to distinct posts they
//! produce the same result.

use super::image::{ImageOutcome, ImageStatus, ImageTicket};
use super::model::{Campaign, Post};

fn with_post<F>(campaign: &Campaign, post_id: &str, update: F) -> Campaign
where
    F: FnOnce(&mut Post),
{
    let mut next = campaign.clone();
    if let Some(post) = next.posts.iter_mut().find(|post| post.id == post_id) {
        update(post);
    }
    next
}

/// Marks `post_id` as waiting for `ticket`.
///
/// The current image is kept as `previous` until the call settles. Returns
/// `None` if the campaign has no such post.
pub fn begin_image_generation(
    campaign: &Campaign,
    post_id: &str,
    ticket: ImageTicket,
) -> Option<Campaign> {
    campaign.post(post_id)?;

    Some(with_post(campaign, post_id, |post| {
        let previous = post.image().cloned();
        post.image_status = ImageStatus::Generating { ticket, previous };
    }))
}

/// True if a completion for `ticket` would be applied to `post_id`.
pub fn accepts_image_result(campaign: &Campaign, post_id: &str, ticket: ImageTicket) -> bool {
    campaign
        .post(post_id)
        .and_then(Post::pending_ticket)
        .is_some_and(|pending| pending == ticket)
}

/// Merges a settled image call into the post it was dispatched for.
///
/// Completions for unknown posts, or whose ticket is not the one the post is
/// waiting for, leave the campaign unchanged. On failure the post falls back to
/// its previous image, or to no image.
pub fn merge_image_result(
    campaign: &Campaign,
    post_id: &str,
    ticket: ImageTicket,
    outcome: ImageOutcome,
) -> Campaign {
    if !accepts_image_result(campaign, post_id, ticket) {
        return campaign.clone();
    }

    with_post(campaign, post_id, |post| {
        let previous = match std::mem::replace(&mut post.image_status, ImageStatus::Absent) {
            ImageStatus::Generating { previous, .. } => previous,
            _ => None,
        };

        post.image_status = match (outcome, previous) {
            (ImageOutcome::Generated(image), _) => ImageStatus::Ready { image },
            (ImageOutcome::Failed, Some(image)) => ImageStatus::Ready { image },
            (ImageOutcome::Failed, None) => ImageStatus::Absent,
        };
    })
}

/// Sets the posted flag of `post_id`. Returns `None` if there is no such post.
pub fn mark_posted(campaign: &Campaign, post_id: &str) -> Option<Campaign> {
    campaign.post(post_id)?;
    Some(with_post(campaign, post_id, |post| post.posted = true))
}
