use std::collections::HashSet;

/// Context of a single bot invocation, assembled once from the trigger
/// environment before any core logic runs. Never mutated afterwards.
#[derive(Debug)]
pub struct MentionContext {
    /// Name of the event that triggered this run, e.g. `pull_request`.
    pub event_name: String,
    /// Action of the trigger event, e.g. `closed`. Empty when the payload
    /// did not carry one.
    pub event_action: String,
    /// Whether the pull request has been merged.
    pub pr_merged: bool,
    /// State of the submitted review in the payload casing, e.g. `approved`.
    /// Empty for events that are not reviews.
    pub review_state: String,
    /// Username of the user whose action triggered the event.
    pub actor: String,
    /// Usernames that should never be mentioned.
    pub machine_users: HashSet<String>,
}
