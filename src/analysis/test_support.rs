use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Error, Result};
use crate::github::GitHubApi;
use crate::models::{ContributionDay, ContributionYear, Repository, UserProfile};

pub fn repo(id: u64, name: &str, fork: bool, stars: u32) -> Repository {
    Repository {
        id,
        name: name.to_string(),
        description: None,
        stargazers_count: stars,
        forks_count: 0,
        language: None,
        html_url: format!("https://github.com/octocat/{}", name),
        updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        topics: Vec::new(),
        fork,
        homepage: None,
        commit_count: None,
    }
}

pub fn user() -> UserProfile {
    UserProfile {
        login: "octocat".to_string(),
        name: Some("The Octocat".to_string()),
        bio: None,
        public_repos: 8,
        followers: 120,
        following: 9,
        created_at: Utc.with_ymd_and_hms(2011, 1, 25, 18, 44, 36).unwrap(),
    }
}

/// A whole year of days with the given counts from Jan 1, zero afterwards.
pub fn year_with(year: i32, leading: &[u32], reported_total: u32) -> ContributionYear {
    let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
    let mut days = Vec::new();
    let mut date = start;
    while date.year() == year {
        let idx = (date - start).num_days() as usize;
        days.push(ContributionDay::new(date, leading.get(idx).copied().unwrap_or(0)));
        date += Duration::days(1);
    }
    ContributionYear {
        year,
        total_contributions: reported_total,
        days,
    }
}

/// In-memory `GitHubApi`. Anything not configured fails with a 404.
#[derive(Default)]
pub struct FakeApi {
    pub user: Option<UserProfile>,
    pub repos: Option<Vec<Repository>>,
    pub commit_counts: HashMap<String, u32>,
    pub years: HashMap<i32, ContributionYear>,
    pub delay_ms: u64,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub commit_calls: AtomicUsize,
}

impl FakeApi {
    fn not_found() -> Error {
        Error::RequestFailed {
            status: 404,
            message: "Not Found".to_string(),
        }
    }

    async fn track<T>(&self, result: Result<T>) -> Result<T> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if self.delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[async_trait]
impl GitHubApi for FakeApi {
    async fn get_user(&self, _login: &str) -> Result<UserProfile> {
        self.track(self.user.clone().ok_or_else(Self::not_found)).await
    }

    async fn get_owned_repos(&self, _login: &str) -> Result<Vec<Repository>> {
        self.track(self.repos.clone().ok_or_else(Self::not_found)).await
    }

    async fn get_commit_count(&self, _owner: &str, repo: &str) -> Result<u32> {
        self.commit_calls.fetch_add(1, Ordering::SeqCst);
        let result = self
            .commit_counts
            .get(repo)
            .copied()
            .ok_or_else(Self::not_found);
        self.track(result).await
    }

    async fn get_contributions(&self, _login: &str, year: i32) -> Result<ContributionYear> {
        self.track(self.years.get(&year).cloned().ok_or_else(Self::not_found))
            .await
    }
}
