use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ContributionYear, Repository, UserProfile};

/// The slice of the GitHub API the statistics engine depends on.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    async fn get_user(&self, login: &str) -> Result<UserProfile>;

    /// One page of up to 100 owner-type repositories, most recently updated
    /// first. Forks are included; filtering is the caller's job.
    async fn get_owned_repos(&self, login: &str) -> Result<Vec<Repository>>;

    async fn get_commit_count(&self, owner: &str, repo: &str) -> Result<u32>;

    async fn get_contributions(&self, login: &str, year: i32) -> Result<ContributionYear>;
}
