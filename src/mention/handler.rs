use anyhow::Context;

use super::{
    collect_candidates, filter_recipients, mention_comment, MentionContext, PullRequestProvider,
};
use crate::github::PullRequestNumber;

/// Reacts to activity on a bot-authored pull request: loads everyone involved
/// with the PR, decides who should hear about the event and posts a single
/// comment that mentions them. When nobody is left after filtering, no
/// comment is posted.
pub async fn handle_pull_request_activity<P: PullRequestProvider>(
    provider: &P,
    ctx: &MentionContext,
    pr: PullRequestNumber,
) -> anyhow::Result<()> {
    let data = provider
        .fetch_pull_request(pr)
        .await
        .with_context(|| format!("Cannot fetch pull request {pr}"))?;

    let mut commits = data.commits.records;
    let mut has_next_page = data.commits.has_next_page;
    let mut cursor = data.commits.end_cursor;
    while has_next_page {
        let Some(after) = cursor else {
            break;
        };
        let page = provider
            .fetch_more_commits(pr, &after)
            .await
            .with_context(|| format!("Cannot fetch further commits of PR {pr}"))?;
        commits.extend(page.records);
        has_next_page = page.has_next_page;
        cursor = page.end_cursor;
    }

    let mut reviews = data.reviews.records;
    let mut has_next_page = data.reviews.has_next_page;
    let mut cursor = data.reviews.end_cursor;
    while has_next_page {
        let Some(after) = cursor else {
            break;
        };
        let page = provider
            .fetch_more_reviews(pr, &after)
            .await
            .with_context(|| format!("Cannot fetch further reviews of PR {pr}"))?;
        reviews.extend(page.records);
        has_next_page = page.has_next_page;
        cursor = page.end_cursor;
    }

    let candidates = collect_candidates(ctx, &commits, &reviews, &data.assignees);
    tracing::debug!("Mention candidates for PR {pr}: {candidates:?}");

    let recipients = filter_recipients(candidates, &ctx.actor, &ctx.machine_users);
    if recipients.is_empty() {
        tracing::info!("Nobody left to mention on PR {pr}, not posting a comment");
        return Ok(());
    }

    let text = mention_comment(&recipients, ctx);
    provider
        .post_comment(pr, &text)
        .await
        .with_context(|| format!("Cannot post mention comment to PR {pr}"))?;
    tracing::info!("Mentioned {} user(s) on PR {pr}", recipients.len());
    Ok(())
}
