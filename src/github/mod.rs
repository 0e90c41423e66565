pub mod api;
pub mod client;
pub mod paginator;
pub mod rate_limit;

pub use api::GitHubApi;
pub use client::GitHubClient;
