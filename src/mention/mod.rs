//! Core logic of the bot: decide which humans should hear about activity on a
//! bot-authored pull request and render the comment that mentions them.
use async_trait::async_trait;

use crate::github::{GithubUser, PullRequestNumber};

mod collect;
mod comment;
mod context;
mod filter;
mod handler;

pub use collect::collect_candidates;
pub use comment::mention_comment;
pub use context::MentionContext;
pub use filter::filter_recipients;
pub use handler::handle_pull_request_activity;

/// A single commit of a pull request. The committer identity can be missing
/// (e.g. when the commit e-mail is not linked to any account), and so can any
/// of the co-author identities.
#[derive(Clone, Debug)]
pub struct CommitRecord {
    pub committer: Option<GithubUser>,
    pub authors: Vec<Option<GithubUser>>,
}

/// A single review of a pull request.
#[derive(Clone, Debug)]
pub struct ReviewRecord {
    /// State of the review as reported by the API, e.g. `APPROVED`.
    pub state: String,
    pub author: Option<GithubUser>,
}

/// One page of records loaded from a paginated API connection.
#[derive(Clone, Debug)]
pub struct Page<T> {
    pub records: Vec<T>,
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// A pull request with the first page of its commits and reviews and all of
/// its assignees.
#[derive(Clone, Debug)]
pub struct PullRequestData {
    pub commits: Page<CommitRecord>,
    pub reviews: Page<ReviewRecord>,
    pub assignees: Vec<GithubUser>,
}

/// Provides access to the data of pull requests in a single remote repository.
/// It is behind a trait to allow easier mocking in tests.
#[async_trait]
pub trait PullRequestProvider {
    /// Resolve a pull request by its number, together with the first page of
    /// its commits and reviews and all of its assignees.
    async fn fetch_pull_request(&self, pr: PullRequestNumber) -> anyhow::Result<PullRequestData>;

    /// Load the page of commits that starts after the given cursor.
    async fn fetch_more_commits(
        &self,
        pr: PullRequestNumber,
        cursor: &str,
    ) -> anyhow::Result<Page<CommitRecord>>;

    /// Load the page of reviews that starts after the given cursor.
    async fn fetch_more_reviews(
        &self,
        pr: PullRequestNumber,
        cursor: &str,
    ) -> anyhow::Result<Page<ReviewRecord>>;

    /// Post a comment to the pull request with the given number.
    async fn post_comment(&self, pr: PullRequestNumber, text: &str) -> anyhow::Result<()>;
}
