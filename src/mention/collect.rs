use itertools::Itertools;

use super::{CommitRecord, MentionContext, ReviewRecord};
use crate::github::GithubUser;

/// Review state used by the API for an approving review.
const APPROVED_STATE: &str = "APPROVED";

/// Gathers the usernames that should be considered for a mention: every present
/// committer and co-author of the PR's commits, the authors of approving
/// reviews when a pull request was closed, and all assignees.
///
/// Identities missing from the input data are skipped. The returned list has
/// set semantics: a username contributed by multiple sources appears once, at
/// the position of its first occurrence.
pub fn collect_candidates(
    ctx: &MentionContext,
    commits: &[CommitRecord],
    reviews: &[ReviewRecord],
    assignees: &[GithubUser],
) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();

    for commit in commits {
        if let Some(committer) = &commit.committer {
            candidates.push(committer.username.clone());
        }
        for author in commit.authors.iter().flatten() {
            candidates.push(author.username.clone());
        }
    }

    // Approvals are only announced when the pull request was closed (e.g. by a
    // merge). When the trigger is a review event, the review itself is the
    // thing being announced and must not pull its approvers in here.
    if ctx.event_name == "pull_request" && ctx.event_action == "closed" {
        for review in reviews {
            if review.state == APPROVED_STATE {
                if let Some(author) = &review.author {
                    candidates.push(author.username.clone());
                }
            }
        }
    }

    for assignee in assignees {
        candidates.push(assignee.username.clone());
    }

    candidates.into_iter().unique().collect()
}
