use itertools::Itertools;

use super::MentionContext;

/// Renders the comment text: the mentioned users in order, a single space,
/// then one sentence describing the trigger event.
///
/// Callers are expected to check for an empty user list before calling this;
/// there is nobody to address in that case and no comment should be posted.
pub fn mention_comment(users: &[String], ctx: &MentionContext) -> String {
    let mentions = users.iter().map(|user| format!("@{user}")).join(" ");
    format!("{mentions} {}", action_sentence(ctx))
}

/// A single sentence describing what happened to the pull request.
fn action_sentence(ctx: &MentionContext) -> String {
    match ctx.event_name.as_str() {
        "pull_request" => {
            // A merged PR also reports the `closed` action; merging wins.
            if ctx.pr_merged {
                "Merged the pull request.".to_string()
            } else if ctx.event_action == "closed" {
                "Closed the pull request.".to_string()
            } else {
                format!("Pull request {}.", ctx.event_action)
            }
        }
        "pull_request_review" => match ctx.review_state.as_str() {
            "approved" => "The pull request was approved.".to_string(),
            "changes_requested" => "Changes were requested.".to_string(),
            "commented" => "A comment was left on the pull request.".to_string(),
            _ => "A review was submitted.".to_string(),
        },
        _ => format!("Event: {}/{}.", ctx.event_name, ctx.event_action),
    }
}
