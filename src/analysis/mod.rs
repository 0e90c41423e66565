pub mod aggregator;
pub mod calendar;
pub mod fetcher;
pub mod streaks;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregator::StatsAggregator;
pub use calendar::{build_grid, calendar_view, contribution_level, month_label_positions};
pub use fetcher::RepositoryFetcher;
pub use streaks::{current_streak, longest_streak};
pub use views::{language_stats, top_repositories};
