//! Contains definitions of common types (repository name, user, PR number) needed
//! for working with (GitHub) repositories.
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use url::Url;

pub mod api;
pub mod payload;

/// Unique identifier of a GitHub repository
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct GithubRepoName {
    owner: String,
    name: String,
}

impl GithubRepoName {
    pub fn new(owner: &str, name: &str) -> Self {
        Self {
            owner: owner.to_lowercase(),
            name: name.to_lowercase(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for GithubRepoName {
    type Err = anyhow::Error;

    /// Parses a repository name from the `<owner>/<name>` format.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let Some((owner, name)) = value.split_once('/') else {
            return Err(anyhow::anyhow!(
                "Repository name `{value}` does not have the <owner>/<name> format"
            ));
        };
        Ok(Self::new(owner, name))
    }
}

impl Display for GithubRepoName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}/{}", self.owner, self.name))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GithubUser {
    pub username: String,
    pub html_url: Url,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PullRequestNumber(pub u64);

impl From<u64> for PullRequestNumber {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for PullRequestNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <u64 as Display>::fmt(&self.0, f)
    }
}
