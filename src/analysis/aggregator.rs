use chrono::{Datelike, NaiveDate, Utc};
use futures::future::join_all;
use std::sync::Arc;

use crate::analysis::calendar::calendar_view;
use crate::analysis::fetcher::RepositoryFetcher;
use crate::analysis::streaks::{current_streak, longest_streak};
use crate::analysis::views::{language_stats, top_repositories};
use crate::config::StatsConfig;
use crate::error::Result;
use crate::github::GitHubApi;
use crate::models::{
    CalendarView, ContributionYear, Dashboard, GitHubStats, LanguageStat, Repository, UserProfile,
};

pub struct StatsAggregator {
    api: Arc<dyn GitHubApi>,
    fetcher: RepositoryFetcher,
    config: StatsConfig,
}

impl StatsAggregator {
    pub fn new(api: impl GitHubApi + 'static, config: StatsConfig) -> Self {
        Self::with_shared(Arc::new(api), config)
    }

    pub fn with_shared(api: Arc<dyn GitHubApi>, config: StatsConfig) -> Self {
        let fetcher = RepositoryFetcher::new(api.clone(), config.concurrency_limit);
        Self {
            api,
            fetcher,
            config,
        }
    }

    pub fn owner(&self) -> &str {
        &self.config.owner
    }

    pub async fn compute_stats(&self) -> Result<GitHubStats> {
        self.compute_stats_at(Utc::now().date_naive()).await
    }

    /// Profile summary as of `today`. Fails as a whole if the profile, the
    /// repository listing or this year's calendar cannot be fetched.
    pub async fn compute_stats_at(&self, today: NaiveDate) -> Result<GitHubStats> {
        let (stats, _) = self.collect(today).await?;
        Ok(stats)
    }

    pub async fn dashboard(&self) -> Result<Dashboard> {
        self.dashboard_at(Utc::now().date_naive()).await
    }

    /// Stats plus the repository projections, from a single repository fetch.
    pub async fn dashboard_at(&self, today: NaiveDate) -> Result<Dashboard> {
        let (stats, repos) = self.collect(today).await?;
        Ok(Dashboard {
            stats,
            top_repositories: top_repositories(&repos, self.config.top_repos_limit),
            languages: language_stats(&repos),
            repositories: repos,
        })
    }

    pub async fn repositories(&self) -> Result<Vec<Repository>> {
        self.fetcher.fetch_repositories(&self.config.owner).await
    }

    pub async fn calendar(&self, year: i32) -> Result<CalendarView> {
        let contributions = self.api.get_contributions(&self.config.owner, year).await?;
        calendar_view(&contributions)
    }

    pub fn top_repositories(&self, repos: &[Repository]) -> Vec<Repository> {
        top_repositories(repos, self.config.top_repos_limit)
    }

    pub fn language_stats(&self, repos: &[Repository]) -> Vec<LanguageStat> {
        language_stats(repos)
    }

    async fn collect(&self, today: NaiveDate) -> Result<(GitHubStats, Vec<Repository>)> {
        let owner = self.config.owner.as_str();
        let year = today.year();
        tracing::info!("Computing GitHub stats for {} ({})", owner, year);

        let required = async {
            tokio::try_join!(
                self.api.get_user(owner),
                self.fetcher.fetch_repositories(owner),
                self.api.get_contributions(owner, year),
            )
        };
        let (required, prior_totals) = tokio::join!(required, self.prior_year_totals(year));
        let (user, repos, current) = required?;

        let lifetime = current.total_contributions + prior_totals;
        let stats = summarize(&user, &repos, &current, lifetime, today);
        tracing::info!(
            "{}: {} stars, {} contributions, current streak {}",
            owner,
            stats.total_stars,
            stats.contributions,
            stats.current_streak
        );

        Ok((stats, repos))
    }

    /// Best-effort sum of the reported totals of the years before `year`.
    /// A year that fails is logged and left out.
    async fn prior_year_totals(&self, year: i32) -> u32 {
        let owner = self.config.owner.as_str();
        let years = (1..self.config.lifetime_years as i32).map(|back| year - back);

        let fetches = years.map(|y| async move { (y, self.api.get_contributions(owner, y).await) });

        join_all(fetches)
            .await
            .into_iter()
            .filter_map(|(y, result)| match result {
                Ok(data) => Some(data.total_contributions),
                Err(e) => {
                    tracing::warn!("Failed to fetch contributions for year {}: {}", y, e);
                    None
                }
            })
            .sum()
    }
}

/// Folds the fetched pieces into one summary. `repos` is expected to be
/// fork-free already; forks are skipped again regardless.
pub fn summarize(
    user: &UserProfile,
    repos: &[Repository],
    current: &ContributionYear,
    lifetime_contributions: u32,
    today: NaiveDate,
) -> GitHubStats {
    let own = repos.iter().filter(|r| !r.fork);
    let (total_stars, total_forks) = own.fold((0, 0), |(stars, forks), r| {
        (stars + r.stargazers_count, forks + r.forks_count)
    });

    let days = current.sorted_days();

    GitHubStats {
        total_stars,
        total_forks,
        total_repos: user.public_repos,
        followers: user.followers,
        following: user.following,
        contributions: lifetime_contributions,
        current_streak: current_streak(&days, today),
        longest_streak: longest_streak(&days),
    }
}
