//! Parsing of the JSON payload describing the event that triggered this run.
use crate::github::PullRequestNumber;

#[derive(serde::Deserialize, Debug)]
struct EventPayload {
    action: Option<String>,
    pull_request: Option<PullRequestPayload>,
    review: Option<ReviewPayload>,
}

#[derive(serde::Deserialize, Debug)]
struct PullRequestPayload {
    number: u64,
    #[serde(default)]
    merged: bool,
}

#[derive(serde::Deserialize, Debug)]
struct ReviewPayload {
    state: Option<String>,
}

/// The fields of the trigger event that the bot acts upon.
#[derive(Debug, PartialEq)]
pub struct TriggerEvent {
    pub pr_number: PullRequestNumber,
    /// Action reported by the payload, e.g. `closed`. Empty when absent.
    pub action: String,
    pub pr_merged: bool,
    /// State of the submitted review, e.g. `approved`. Empty for payloads
    /// that do not carry a review.
    pub review_state: String,
}

#[derive(thiserror::Error, Debug)]
pub enum PayloadError {
    #[error("Cannot deserialize event payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

/// Extracts the trigger event from a JSON event payload.
/// Returns `None` for payloads that do not belong to a pull request.
pub fn parse_trigger_event(body: &[u8]) -> Result<Option<TriggerEvent>, PayloadError> {
    let payload: EventPayload = serde_json::from_slice(body)?;
    let Some(pull_request) = payload.pull_request else {
        return Ok(None);
    };
    Ok(Some(TriggerEvent {
        pr_number: pull_request.number.into(),
        action: payload.action.unwrap_or_default(),
        pr_merged: pull_request.merged,
        review_state: payload
            .review
            .and_then(|review| review.state)
            .unwrap_or_default(),
    }))
}

#[cfg(test)]
mod tests {
    use super::parse_trigger_event;

    #[test]
    fn parse_merged_pull_request() {
        let body = br#"{
            "action": "closed",
            "pull_request": {
                "number": 5,
                "merged": true,
                "title": "Bump the dependencies"
            },
            "sender": {
                "login": "release-bot"
            }
        }"#;
        insta::assert_debug_snapshot!(
            parse_trigger_event(body).unwrap(),
            @r###"
        Some(
            TriggerEvent {
                pr_number: PullRequestNumber(
                    5,
                ),
                action: "closed",
                pr_merged: true,
                review_state: "",
            },
        )
        "###
        );
    }

    #[test]
    fn parse_submitted_review() {
        let body = br#"{
            "action": "submitted",
            "pull_request": {
                "number": 12
            },
            "review": {
                "state": "changes_requested"
            }
        }"#;
        insta::assert_debug_snapshot!(
            parse_trigger_event(body).unwrap(),
            @r###"
        Some(
            TriggerEvent {
                pr_number: PullRequestNumber(
                    12,
                ),
                action: "submitted",
                pr_merged: false,
                review_state: "changes_requested",
            },
        )
        "###
        );
    }

    #[test]
    fn ignore_payload_without_pull_request() {
        let body = br#"{"action": "created", "issue": {"number": 3}}"#;
        assert_eq!(parse_trigger_event(body).unwrap(), None);
    }

    #[test]
    fn reject_malformed_payload() {
        assert!(parse_trigger_event(b"not json").is_err());
    }
}
