//! Fixed sample data shown in place of live statistics when aggregation fails,
//! so the page still renders completely.

use chrono::{TimeZone, Utc};

use crate::analysis::calendar::calendar_view;
use crate::error::Result;
use crate::models::{
    CalendarView, ContributionYear, Dashboard, GitHubStats, LanguageStat, Repository,
};
use crate::taxonomy::language_color;

pub fn sample_stats() -> GitHubStats {
    GitHubStats {
        total_stars: 127,
        total_forks: 89,
        total_repos: 45,
        followers: 234,
        following: 67,
        contributions: 1250,
        current_streak: 15,
        longest_streak: 45,
    }
}

pub fn sample_repositories(owner: &str) -> Vec<Repository> {
    let samples = [
        (
            1,
            "portfolio-website",
            "A modern, responsive portfolio website built with React and TypeScript",
            42,
            12,
            "TypeScript",
            15,
        ),
        (
            2,
            "ai-chatbot",
            "An intelligent chatbot powered by machine learning algorithms",
            38,
            8,
            "Python",
            10,
        ),
        (
            3,
            "react-components",
            "A collection of reusable React components with modern design",
            25,
            6,
            "JavaScript",
            8,
        ),
    ];

    samples
        .into_iter()
        .map(|(id, name, description, stars, forks, language, day)| Repository {
            id,
            name: name.to_string(),
            description: Some(description.to_string()),
            stargazers_count: stars,
            forks_count: forks,
            language: Some(language.to_string()),
            html_url: format!("https://github.com/{}/{}", owner, name),
            updated_at: Utc
                .with_ymd_and_hms(2024, 1, day, 0, 0, 0)
                .single()
                .unwrap_or_default(),
            topics: Vec::new(),
            fork: false,
            homepage: None,
            commit_count: None,
        })
        .collect()
}

pub fn sample_languages() -> Vec<LanguageStat> {
    [
        ("TypeScript", 45),
        ("JavaScript", 30),
        ("Python", 20),
        ("React", 15),
        ("CSS", 10),
    ]
    .into_iter()
    .map(|(name, count)| LanguageStat {
        name: name.to_string(),
        count,
        color: language_color(name).to_string(),
    })
    .collect()
}

pub fn sample_dashboard(owner: &str) -> Dashboard {
    let repositories = sample_repositories(owner);
    Dashboard {
        stats: sample_stats(),
        top_repositories: repositories.clone(),
        languages: sample_languages(),
        repositories,
    }
}

/// An all-zero calendar for `year`.
pub fn empty_calendar(year: i32) -> Result<CalendarView> {
    calendar_view(&ContributionYear {
        year,
        total_contributions: 0,
        days: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_dashboard_is_complete() {
        let dashboard = sample_dashboard("octocat");
        assert_eq!(dashboard.stats, sample_stats());
        assert_eq!(dashboard.top_repositories.len(), 3);
        assert_eq!(dashboard.languages[0].color, "#3178c6");
        assert!(dashboard.repositories.iter().all(|r| !r.fork));
        assert_eq!(
            dashboard.repositories[0].html_url,
            "https://github.com/octocat/portfolio-website"
        );
    }

    #[test]
    fn test_empty_calendar() {
        let view = empty_calendar(2024).unwrap();
        assert_eq!(view.reported_total, 0);
        assert_eq!(view.local_total, 0);
        assert_eq!(view.month_labels.len(), 12);
        assert!(view.grid.days().all(|d| d.level == 0));
    }
}
