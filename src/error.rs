use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::github::rate_limit::describe_reset;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GitHub API rate limit exceeded. Resets at {}", describe_reset(.reset_at))]
    RateLimited { reset_at: Option<DateTime<Utc>> },

    #[error("GitHub API error: {status} {message}")]
    RequestFailed { status: u16, message: String },

    #[error("GitHub GraphQL error: {0}")]
    GraphQl(String),

    #[error("Year {0} is outside the supported calendar range")]
    InvalidYear(i32),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid contact message: {0}")]
    InvalidContact(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited { .. })
    }
}
