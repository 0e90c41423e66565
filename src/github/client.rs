use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::github::api::GitHubApi;
use crate::github::paginator::count_from_single_item_pages;
use crate::github::rate_limit::{remaining_from_headers, reset_from_headers};
use crate::models::{ContributionDay, ContributionYear, Repository, UserProfile};

const CONTRIBUTIONS_QUERY: &str = r#"
    query($login: String!, $from: DateTime!, $to: DateTime!) {
        user(login: $login) {
            contributionsCollection(from: $from, to: $to) {
                contributionCalendar {
                    totalContributions
                    weeks {
                        contributionDays {
                            contributionCount
                            date
                        }
                    }
                }
            }
        }
    }
"#;

pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: Option<&str>, base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        match token {
            Some(token) => {
                headers.insert(
                    header::AUTHORIZATION,
                    header::HeaderValue::from_str(&format!("Bearer {}", token))?,
                );
            }
            None => tracing::warn!("No GitHub token configured, using unauthenticated rate limits"),
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("ghprofile/0.1"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.github_token.as_deref(),
            &config.api_base_url,
            config.request_timeout(),
        )
    }

    async fn get(&self, url: &str) -> Result<Response> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        check_response(response)
    }

    async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let url = format!("{}/graphql", self.base_url);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;
        let response = check_response(response)?;

        let body: GraphQlResponse<T> = response.json().await?;
        body.into_data()
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn get_user(&self, login: &str) -> Result<UserProfile> {
        let url = format!("{}/users/{}", self.base_url, login);
        tracing::info!("Fetching user: {}", login);
        Ok(self.get(&url).await?.json().await?)
    }

    async fn get_owned_repos(&self, login: &str) -> Result<Vec<Repository>> {
        let url = format!(
            "{}/users/{}/repos?per_page=100&sort=updated&type=owner",
            self.base_url, login
        );
        tracing::info!("Fetching repositories for: {}", login);
        Ok(self.get(&url).await?.json().await?)
    }

    async fn get_commit_count(&self, owner: &str, repo: &str) -> Result<u32> {
        let url = format!("{}/repos/{}/{}/commits?per_page=1", self.base_url, owner, repo);
        let response = self.get(&url).await?;

        let link = response
            .headers()
            .get(header::LINK)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let commits: Vec<serde_json::Value> = response.json().await?;

        Ok(count_from_single_item_pages(link.as_deref(), commits.len()))
    }

    async fn get_contributions(&self, login: &str, year: i32) -> Result<ContributionYear> {
        tracing::debug!("Fetching contribution calendar for {} ({})", login, year);
        let variables = json!({
            "login": login,
            "from": format!("{}-01-01T00:00:00Z", year),
            "to": format!("{}-12-31T23:59:59Z", year),
        });

        let data: CalendarData = self.graphql(CONTRIBUTIONS_QUERY, variables).await?;
        data.into_year(login, year)
    }
}

/// Classifies a response: 403/429 is a rate-limit error, any other non-2xx
/// a request failure.
fn check_response(response: Response) -> Result<Response> {
    let status = response.status();

    if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
        let headers = response.headers();
        tracing::warn!(
            remaining = ?remaining_from_headers(headers),
            "GitHub API rate limit hit ({})",
            status
        );
        return Err(Error::RateLimited {
            reset_at: reset_from_headers(headers),
        });
    }

    if !status.is_success() {
        return Err(Error::RequestFailed {
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }

    Ok(response)
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

impl<T> GraphQlResponse<T> {
    fn into_data(self) -> Result<T> {
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
            return Err(Error::GraphQl(messages.join("; ")));
        }
        self.data
            .ok_or_else(|| Error::GraphQl("response carried no data".to_string()))
    }
}

#[derive(Deserialize)]
struct CalendarData {
    user: Option<CalendarUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarUser {
    contributions_collection: ContributionsCollection,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: ContributionCalendar,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionCalendar {
    total_contributions: u32,
    weeks: Vec<CalendarWeekNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarWeekNode {
    contribution_days: Vec<ContributionDay>,
}

impl CalendarData {
    /// Flattens the week-grouped calendar into one day series.
    fn into_year(self, login: &str, year: i32) -> Result<ContributionYear> {
        let user = self
            .user
            .ok_or_else(|| Error::GraphQl(format!("user {} not found", login)))?;
        let calendar = user.contributions_collection.contribution_calendar;

        let days = calendar
            .weeks
            .into_iter()
            .flat_map(|w| w.contribution_days)
            .collect();

        Ok(ContributionYear {
            year,
            total_contributions: calendar.total_contributions,
            days,
        })
    }
}
