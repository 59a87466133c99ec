use anyhow::Context;
use octocrab::Octocrab;

pub mod client;

pub use client::GithubRepositoryClient;

/// Creates a GitHub API client authenticated with the given access token.
pub fn create_github_client(token: String) -> anyhow::Result<Octocrab> {
    Octocrab::builder()
        .personal_token(token)
        .build()
        .context("Could not create octocrab client")
}
