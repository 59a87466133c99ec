use std::collections::HashSet;

/// Marker that the platform puts into the login of App/bot identities.
const BOT_MARKER: &str = "[bot]";

/// Removes usernames that should not be notified: the user whose action
/// triggered the event, bot accounts, and the configured machine users.
/// The order of the remaining usernames is preserved. An empty result is
/// valid and means there is nothing to post.
pub fn filter_recipients(
    candidates: Vec<String>,
    actor: &str,
    machine_users: &HashSet<String>,
) -> Vec<String> {
    candidates
        .into_iter()
        .filter(|username| username != actor)
        .filter(|username| !username.contains(BOT_MARKER))
        .filter(|username| !machine_users.contains(username))
        .collect()
}
