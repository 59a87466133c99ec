use anyhow::Context;
use async_trait::async_trait;
use octocrab::Octocrab;
use url::Url;

use crate::github::{GithubRepoName, GithubUser, PullRequestNumber};
use crate::mention::{CommitRecord, Page, PullRequestData, PullRequestProvider, ReviewRecord};

/// How many records of each paginated connection are requested per query.
const PAGE_SIZE: u32 = 100;

/// Loads a pull request with the first page of its commits and reviews and
/// all of its assignees. Commit authors cover the co-authors recorded in the
/// commit message; their identity can be null when the e-mail is not linked
/// to an account.
const PULL_REQUEST_QUERY: &str = r#"
query ($owner: String!, $name: String!, $number: Int!, $pageSize: Int!) {
  repository(owner: $owner, name: $name) {
    pullRequest(number: $number) {
      commits(first: $pageSize) {
        pageInfo { hasNextPage endCursor }
        nodes {
          commit {
            committer { user { login url } }
            authors(first: 10) { nodes { user { login url } } }
          }
        }
      }
      reviews(first: $pageSize) {
        pageInfo { hasNextPage endCursor }
        nodes {
          state
          author { login url }
        }
      }
      assignees(first: $pageSize) {
        nodes { login url }
      }
    }
  }
}
"#;

const COMMIT_PAGE_QUERY: &str = r#"
query ($owner: String!, $name: String!, $number: Int!, $pageSize: Int!, $cursor: String!) {
  repository(owner: $owner, name: $name) {
    pullRequest(number: $number) {
      commits(first: $pageSize, after: $cursor) {
        pageInfo { hasNextPage endCursor }
        nodes {
          commit {
            committer { user { login url } }
            authors(first: 10) { nodes { user { login url } } }
          }
        }
      }
    }
  }
}
"#;

const REVIEW_PAGE_QUERY: &str = r#"
query ($owner: String!, $name: String!, $number: Int!, $pageSize: Int!, $cursor: String!) {
  repository(owner: $owner, name: $name) {
    pullRequest(number: $number) {
      reviews(first: $pageSize, after: $cursor) {
        pageInfo { hasNextPage endCursor }
        nodes {
          state
          author { login url }
        }
      }
    }
  }
}
"#;

#[derive(serde::Serialize, Debug)]
struct GraphQlPayload<V> {
    query: &'static str,
    variables: V,
}

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PullRequestVars {
    owner: String,
    name: String,
    number: u64,
    page_size: u32,
}

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PageVars {
    owner: String,
    name: String,
    number: u64,
    page_size: u32,
    cursor: String,
}

#[derive(serde::Deserialize, Debug)]
struct GraphQlResponse<T> {
    data: T,
}

#[derive(serde::Deserialize, Debug)]
struct RepositoryData<T> {
    repository: Option<RepositoryNode<T>>,
}

#[derive(serde::Deserialize, Debug)]
struct RepositoryNode<T> {
    #[serde(rename = "pullRequest")]
    pull_request: Option<T>,
}

#[derive(serde::Deserialize, Debug)]
struct PageInfo {
    #[serde(rename = "hasNextPage")]
    has_next_page: bool,
    #[serde(rename = "endCursor")]
    end_cursor: Option<String>,
}

#[derive(serde::Deserialize, Debug)]
struct UserNode {
    login: String,
    url: Url,
}

#[derive(serde::Deserialize, Debug)]
struct GitActorNode {
    user: Option<UserNode>,
}

#[derive(serde::Deserialize, Debug)]
struct CommitAuthorConnection {
    nodes: Option<Vec<GitActorNode>>,
}

#[derive(serde::Deserialize, Debug)]
struct CommitInner {
    committer: Option<GitActorNode>,
    authors: Option<CommitAuthorConnection>,
}

#[derive(serde::Deserialize, Debug)]
struct CommitNode {
    commit: Option<CommitInner>,
}

#[derive(serde::Deserialize, Debug)]
struct CommitConnection {
    #[serde(rename = "pageInfo")]
    page_info: PageInfo,
    nodes: Option<Vec<CommitNode>>,
}

#[derive(serde::Deserialize, Debug)]
struct ReviewNode {
    state: String,
    author: Option<UserNode>,
}

#[derive(serde::Deserialize, Debug)]
struct ReviewConnection {
    #[serde(rename = "pageInfo")]
    page_info: PageInfo,
    nodes: Option<Vec<ReviewNode>>,
}

#[derive(serde::Deserialize, Debug)]
struct AssigneeConnection {
    nodes: Option<Vec<UserNode>>,
}

#[derive(serde::Deserialize, Debug)]
struct PullRequestNode {
    commits: CommitConnection,
    reviews: ReviewConnection,
    assignees: AssigneeConnection,
}

#[derive(serde::Deserialize, Debug)]
struct CommitsPageNode {
    commits: CommitConnection,
}

#[derive(serde::Deserialize, Debug)]
struct ReviewsPageNode {
    reviews: ReviewConnection,
}

/// Provides access to a single repository using the GitHub API.
pub struct GithubRepositoryClient {
    client: Octocrab,
    repo_name: GithubRepoName,
}

impl GithubRepositoryClient {
    pub fn new(client: Octocrab, repo_name: GithubRepoName) -> Self {
        Self { client, repo_name }
    }

    pub fn name(&self) -> &GithubRepoName {
        &self.repo_name
    }

    fn format_pr(&self, pr: PullRequestNumber) -> String {
        format!("{}/{}", self.repo_name, pr)
    }

    fn pull_request_vars(&self, pr: PullRequestNumber) -> PullRequestVars {
        PullRequestVars {
            owner: self.repo_name.owner().to_string(),
            name: self.repo_name.name().to_string(),
            number: pr.0,
            page_size: PAGE_SIZE,
        }
    }

    fn page_vars(&self, pr: PullRequestNumber, cursor: &str) -> PageVars {
        PageVars {
            owner: self.repo_name.owner().to_string(),
            name: self.repo_name.name().to_string(),
            number: pr.0,
            page_size: PAGE_SIZE,
            cursor: cursor.to_string(),
        }
    }

    /// Unwraps the `repository.pullRequest` path of a GraphQL response.
    fn into_pull_request<T>(
        &self,
        data: RepositoryData<T>,
        pr: PullRequestNumber,
    ) -> anyhow::Result<T> {
        data.repository
            .and_then(|repository| repository.pull_request)
            .ok_or_else(|| anyhow::anyhow!("Pull request {} was not found", self.format_pr(pr)))
    }
}

#[async_trait]
impl PullRequestProvider for GithubRepositoryClient {
    async fn fetch_pull_request(&self, pr: PullRequestNumber) -> anyhow::Result<PullRequestData> {
        let payload = GraphQlPayload {
            query: PULL_REQUEST_QUERY,
            variables: self.pull_request_vars(pr),
        };
        let response: GraphQlResponse<RepositoryData<PullRequestNode>> = self
            .client
            .graphql(&payload)
            .await
            .with_context(|| format!("Cannot fetch pull request {}", self.format_pr(pr)))?;
        let node = self.into_pull_request(response.data, pr)?;
        Ok(PullRequestData {
            commits: commit_page(node.commits),
            reviews: review_page(node.reviews),
            assignees: node
                .assignees
                .nodes
                .unwrap_or_default()
                .into_iter()
                .map(user_from_node)
                .collect(),
        })
    }

    async fn fetch_more_commits(
        &self,
        pr: PullRequestNumber,
        cursor: &str,
    ) -> anyhow::Result<Page<CommitRecord>> {
        let payload = GraphQlPayload {
            query: COMMIT_PAGE_QUERY,
            variables: self.page_vars(pr, cursor),
        };
        let response: GraphQlResponse<RepositoryData<CommitsPageNode>> = self
            .client
            .graphql(&payload)
            .await
            .with_context(|| format!("Cannot fetch commits of PR {}", self.format_pr(pr)))?;
        let node = self.into_pull_request(response.data, pr)?;
        Ok(commit_page(node.commits))
    }

    async fn fetch_more_reviews(
        &self,
        pr: PullRequestNumber,
        cursor: &str,
    ) -> anyhow::Result<Page<ReviewRecord>> {
        let payload = GraphQlPayload {
            query: REVIEW_PAGE_QUERY,
            variables: self.page_vars(pr, cursor),
        };
        let response: GraphQlResponse<RepositoryData<ReviewsPageNode>> = self
            .client
            .graphql(&payload)
            .await
            .with_context(|| format!("Cannot fetch reviews of PR {}", self.format_pr(pr)))?;
        let node = self.into_pull_request(response.data, pr)?;
        Ok(review_page(node.reviews))
    }

    /// The comment will be posted as the user that owns the access token.
    async fn post_comment(&self, pr: PullRequestNumber, text: &str) -> anyhow::Result<()> {
        self.client
            .issues(self.repo_name.owner(), self.repo_name.name())
            .create_comment(pr.0, text)
            .await
            .with_context(|| format!("Cannot post comment to {}", self.format_pr(pr)))?;
        Ok(())
    }
}

fn user_from_node(node: UserNode) -> GithubUser {
    GithubUser {
        username: node.login,
        html_url: node.url,
    }
}

fn commit_page(connection: CommitConnection) -> Page<CommitRecord> {
    let records = connection
        .nodes
        .unwrap_or_default()
        .into_iter()
        .filter_map(|node| node.commit)
        .map(|commit| CommitRecord {
            committer: commit
                .committer
                .and_then(|committer| committer.user)
                .map(user_from_node),
            authors: commit
                .authors
                .and_then(|authors| authors.nodes)
                .unwrap_or_default()
                .into_iter()
                .map(|author| author.user.map(user_from_node))
                .collect(),
        })
        .collect();
    Page {
        records,
        has_next_page: connection.page_info.has_next_page,
        end_cursor: connection.page_info.end_cursor,
    }
}

fn review_page(connection: ReviewConnection) -> Page<ReviewRecord> {
    let records = connection
        .nodes
        .unwrap_or_default()
        .into_iter()
        .map(|review| ReviewRecord {
            state: review.state,
            author: review.author.map(user_from_node),
        })
        .collect();
    Page {
        records,
        has_next_page: connection.page_info.has_next_page,
        end_cursor: connection.page_info.end_cursor,
    }
}
