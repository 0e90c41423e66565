use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const NO_DESCRIPTION: &str = "No description available";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub language: Option<String>,
    pub html_url: String,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub fork: bool,
    #[serde(default)]
    pub homepage: Option<String>,
    /// Filled in after the listing by the commit-count enrichment pass.
    #[serde(default)]
    pub commit_count: Option<u32>,
}

impl Repository {
    pub fn commits(&self) -> u32 {
        self.commit_count.unwrap_or(0)
    }
}

/// Drops forks; every derived statistic works on the result of this filter.
pub fn without_forks(repos: Vec<Repository>) -> Vec<Repository> {
    repos.into_iter().filter(|r| !r.fork).collect()
}
