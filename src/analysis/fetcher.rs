use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::error::Result;
use crate::github::GitHubApi;
use crate::models::{without_forks, Repository};

/// Lists an account's own repositories and attaches commit counts.
pub struct RepositoryFetcher {
    api: Arc<dyn GitHubApi>,
    concurrency_limit: usize,
}

impl RepositoryFetcher {
    pub fn new(api: Arc<dyn GitHubApi>, concurrency_limit: usize) -> Self {
        Self {
            api,
            concurrency_limit: concurrency_limit.max(1),
        }
    }

    /// Non-fork repositories of `owner`, in listing order, each with a
    /// commit count. Only the first page of 100 is read.
    ///
    /// A failed listing fails the call; a failed commit lookup only sets that
    /// repository's count to 0.
    pub async fn fetch_repositories(&self, owner: &str) -> Result<Vec<Repository>> {
        let listed = self.api.get_owned_repos(owner).await?;
        let total = listed.len();
        let repos = without_forks(listed);
        tracing::info!(
            "Found {} repositories ({} forks skipped)",
            repos.len(),
            total - repos.len()
        );

        Ok(self.attach_commit_counts(owner, repos).await)
    }

    async fn attach_commit_counts(&self, owner: &str, repos: Vec<Repository>) -> Vec<Repository> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency_limit));

        let pb = ProgressBar::new(repos.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} repos")
        {
            pb.set_style(style.progress_chars("#>-"));
        }

        let lookups = repos.into_iter().map(|mut repo| {
            let api = self.api.clone();
            let sem = semaphore.clone();
            let pb = pb.clone();

            async move {
                let count = match sem.acquire().await {
                    Ok(_permit) => api.get_commit_count(owner, &repo.name).await,
                    Err(e) => {
                        tracing::warn!("Commit lookup for {} not scheduled: {}", repo.name, e);
                        Ok(0)
                    }
                };

                repo.commit_count = Some(match count {
                    Ok(count) => count,
                    Err(e) => {
                        tracing::warn!("Failed to fetch commits for {}: {}", repo.name, e);
                        0
                    }
                });

                pb.inc(1);
                repo
            }
        });

        let repos = join_all(lookups).await;
        pb.finish_and_clear();
        repos
    }
}
