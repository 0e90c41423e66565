use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a GitHub account as returned by `GET /users/{login}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub created_at: DateTime<Utc>,
}
