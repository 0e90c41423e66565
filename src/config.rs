use crate::error::{Error, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub github_username: Option<String>,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub concurrency_limit: usize,
    pub lifetime_years: u32,
    pub top_repos_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let github_token = non_empty_var("GITHUB_TOKEN");

        let github_username = non_empty_var("GITHUB_USERNAME");

        let api_base_url = non_empty_var("GITHUB_API_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let request_timeout_secs = parsed_var("REQUEST_TIMEOUT_SECS")?.unwrap_or(10);
        let concurrency_limit = parsed_var("CONCURRENCY_LIMIT")?.unwrap_or(8);
        let lifetime_years = parsed_var("LIFETIME_YEARS")?.unwrap_or(5);
        let top_repos_limit = parsed_var("TOP_REPOS_LIMIT")?.unwrap_or(6);

        let config = Self {
            github_token,
            github_username,
            api_base_url,
            request_timeout_secs,
            concurrency_limit,
            lifetime_years,
            top_repos_limit,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(Error::Config("REQUEST_TIMEOUT_SECS must be at least 1".to_string()));
        }
        if self.concurrency_limit == 0 {
            return Err(Error::Config("CONCURRENCY_LIMIT must be at least 1".to_string()));
        }
        if self.lifetime_years == 0 {
            return Err(Error::Config("LIFETIME_YEARS must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Builds the aggregator configuration, preferring an explicit owner over
    /// `GITHUB_USERNAME`.
    pub fn stats_config(&self, owner: Option<&str>) -> Result<StatsConfig> {
        let owner = owner
            .map(str::to_string)
            .or_else(|| self.github_username.clone())
            .ok_or_else(|| {
                Error::Config(
                    "no GitHub username given; pass --username or set GITHUB_USERNAME"
                        .to_string(),
                )
            })?;

        Ok(StatsConfig {
            owner,
            lifetime_years: self.lifetime_years,
            top_repos_limit: self.top_repos_limit,
            concurrency_limit: self.concurrency_limit,
        })
    }
}

#[derive(Debug, Clone)]
pub struct StatsConfig {
    pub owner: String,
    pub lifetime_years: u32,
    pub top_repos_limit: usize,
    pub concurrency_limit: usize,
}

impl StatsConfig {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            lifetime_years: 5,
            top_repos_limit: 6,
            concurrency_limit: 8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContactConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub receiver_email: String,
    pub followup_template_id: Option<String>,
}

impl ContactConfig {
    pub fn from_env() -> Result<Self> {
        let required = |name: &str| {
            non_empty_var(name).ok_or_else(|| {
                Error::Config(format!(
                    "Email service not configured: {} environment variable not set",
                    name
                ))
            })
        };

        Ok(Self {
            service_id: required("EMAILJS_SERVICE_ID")?,
            template_id: required("EMAILJS_TEMPLATE_ID")?,
            public_key: required("EMAILJS_PUBLIC_KEY")?,
            receiver_email: required("EMAILJS_RECEIVER_EMAIL")?,
            followup_template_id: non_empty_var("EMAILJS_TEMPLATE_ID_FOLLOWUP"),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match non_empty_var(name) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("{} has an invalid value: {}", name, raw))),
        None => Ok(None),
    }
}
