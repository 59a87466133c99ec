//! End-to-end tests of the mention flow, from fetched PR data to the posted
//! comment, using a mocked repository provider.
use std::collections::HashSet;

use crate::config::parse_machine_users;
use crate::mention::{
    handle_pull_request_activity, CommitRecord, MentionContext, ReviewRecord,
};

use mocks::{user, MockPullRequestProvider};


fn context(event_name: &str, event_action: &str, actor: &str) -> MentionContext {
    MentionContext {
        event_name: event_name.to_string(),
        event_action: event_action.to_string(),
        pr_merged: false,
        review_state: String::new(),
        actor: actor.to_string(),
        machine_users: HashSet::new(),
    }
}

fn commit(committer: &str) -> CommitRecord {
    CommitRecord {
        committer: Some(user(committer)),
        authors: Vec::new(),
    }
}

fn approved_review(author: &str) -> ReviewRecord {
    ReviewRecord {
        state: "APPROVED".to_string(),
        author: Some(user(author)),
    }
}

#[tokio::test]
async fn mention_users_involved_in_merged_pr() {
    let provider = MockPullRequestProvider::new(
        vec![vec![commit("alice")]],
        vec![vec![approved_review("bob")]],
        vec![user("carol")],
    );
    let mut ctx = context("pull_request", "closed", "alice");
    ctx.pr_merged = true;

    handle_pull_request_activity(&provider, &ctx, 1.into())
        .await
        .unwrap();
    assert_eq!(
        provider.posted_comments(),
        vec!["@bob @carol Merged the pull request."]
    );
}

#[tokio::test]
async fn drain_all_commit_pages() {
    let provider = MockPullRequestProvider::new(
        vec![
            vec![commit("alice")],
            vec![commit("bob")],
            vec![commit("carol")],
        ],
        vec![Vec::new()],
        Vec::new(),
    );
    let ctx = context("pull_request", "opened", "release-bot");

    handle_pull_request_activity(&provider, &ctx, 1.into())
        .await
        .unwrap();
    assert_eq!(
        provider.posted_comments(),
        vec!["@alice @bob @carol Pull request opened."]
    );
}

#[tokio::test]
async fn drain_all_review_pages_when_pr_was_closed() {
    let provider = MockPullRequestProvider::new(
        vec![Vec::new()],
        vec![
            vec![approved_review("alice")],
            vec![approved_review("bob")],
        ],
        Vec::new(),
    );
    let ctx = context("pull_request", "closed", "release-bot");

    handle_pull_request_activity(&provider, &ctx, 1.into())
        .await
        .unwrap();
    assert_eq!(
        provider.posted_comments(),
        vec!["@alice @bob Closed the pull request."]
    );
}

#[tokio::test]
async fn post_nothing_when_everyone_is_filtered_out() {
    let provider = MockPullRequestProvider::new(
        vec![vec![commit("alice"), commit("dependabot[bot]")]],
        vec![Vec::new()],
        vec![user("releasebot")],
    );
    let mut ctx = context("pull_request", "opened", "alice");
    ctx.machine_users = parse_machine_users("# automation\nreleasebot\n");

    handle_pull_request_activity(&provider, &ctx, 1.into())
        .await
        .unwrap();
    assert_eq!(provider.posted_comments(), Vec::<String>::new());
}

#[tokio::test]
async fn review_event_does_not_mention_approvers() {
    let provider = MockPullRequestProvider::new(
        vec![vec![commit("alice")]],
        vec![vec![approved_review("bob")]],
        Vec::new(),
    );
    let mut ctx = context("pull_request_review", "submitted", "bob");
    ctx.review_state = "approved".to_string();

    handle_pull_request_activity(&provider, &ctx, 1.into())
        .await
        .unwrap();
    assert_eq!(
        provider.posted_comments(),
        vec!["@alice The pull request was approved."]
    );
}
