pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod taxonomy;
pub mod analysis;
pub mod fallback;
pub mod contact;

pub use config::{Config, ContactConfig, StatsConfig};
pub use error::{Error, Result};
pub use github::{GitHubApi, GitHubClient};
pub use analysis::{RepositoryFetcher, StatsAggregator};
pub use contact::{ContactMessage, EmailJsRelay};
