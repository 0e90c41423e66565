use serde::{Deserialize, Serialize};

use super::repository::Repository;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubStats {
    pub total_stars: u32,
    pub total_forks: u32,
    pub total_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub contributions: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageStat {
    pub name: String,
    pub count: u32,
    pub color: String,
}

/// What the GitHub section renders: the summary and its repository views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub stats: GitHubStats,
    pub top_repositories: Vec<Repository>,
    pub languages: Vec<LanguageStat>,
    pub repositories: Vec<Repository>,
}
