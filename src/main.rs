use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use ghprofile::analysis::top_repositories;
use ghprofile::models::{CalendarView, Dashboard, GitHubStats, LanguageStat, Repository};
use ghprofile::{
    fallback, Config, ContactConfig, ContactMessage, EmailJsRelay, GitHubClient, StatsAggregator,
};

#[derive(Parser, Debug)]
#[command(name = "ghprofile")]
#[command(version = "0.1.0")]
#[command(about = "GitHub statistics and contribution calendar for a portfolio profile")]
struct Args {
    /// GitHub username (defaults to GITHUB_USERNAME)
    #[arg(short, long, global = true)]
    username: Option<String>,

    /// Output format (json, text)
    #[arg(short, long, default_value = "text", global = true)]
    format: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Profile summary: stars, forks, contributions, streaks
    Stats {
        /// Print the sample data set instead of failing
        #[arg(long)]
        fallback: bool,
    },
    /// Repositories with the most commits
    TopRepos {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Primary-language histogram
    Languages,
    /// Contribution heat-map for one year
    Calendar {
        /// Defaults to the current year
        #[arg(short, long)]
        year: Option<i32>,

        /// Print an empty calendar instead of failing
        #[arg(long)]
        fallback: bool,
    },
    /// Relay a contact-form message by email
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("ghprofile=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;

    let aggregator = || -> anyhow::Result<StatsAggregator> {
        let stats_config = config.stats_config(args.username.as_deref())?;
        let github = GitHubClient::from_config(&config)?;
        Ok(StatsAggregator::new(github, stats_config))
    };

    match &args.command {
        Command::Stats { fallback: use_fallback } => {
            let aggregator = aggregator()?;
            let dashboard = match aggregator.dashboard().await {
                Ok(dashboard) => dashboard,
                Err(e) if *use_fallback => {
                    if e.is_rate_limited() {
                        tracing::warn!("{}. Please try again later.", e);
                    } else {
                        tracing::warn!("Failed to load GitHub data ({}), using sample data", e);
                    }
                    fallback::sample_dashboard(aggregator.owner())
                }
                Err(e) => return Err(e.into()),
            };
            emit(&args.format, &dashboard, format_dashboard)?;
        }
        Command::TopRepos { limit } => {
            let aggregator = aggregator()?;
            let repos = aggregator.repositories().await?;
            let top = match limit {
                Some(limit) => top_repositories(&repos, *limit),
                None => aggregator.top_repositories(&repos),
            };
            emit(&args.format, &top, |r| format_repos(r))?;
        }
        Command::Languages => {
            let aggregator = aggregator()?;
            let repos = aggregator.repositories().await?;
            let languages = aggregator.language_stats(&repos);
            emit(&args.format, &languages, |l| format_languages(l))?;
        }
        Command::Calendar {
            year,
            fallback: use_fallback,
        } => {
            let year = year.unwrap_or_else(|| Utc::now().year());
            let view = match aggregator()?.calendar(year).await {
                Ok(view) => view,
                Err(e) if *use_fallback => {
                    tracing::warn!(
                        "Failed to load contributions ({}), showing an empty calendar",
                        e
                    );
                    fallback::empty_calendar(year)?
                }
                Err(e) => return Err(e.into()),
            };
            emit(&args.format, &view, format_calendar)?;
        }
        Command::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let relay = EmailJsRelay::new(ContactConfig::from_env()?, config.request_timeout())?;
            let msg = ContactMessage {
                name: name.clone(),
                email: email.clone(),
                subject: subject.clone(),
                message: message.clone(),
            };
            let outcome = relay.send(&msg).await?;
            println!("{}", outcome.message);
        }
    }

    Ok(())
}

fn emit<T: Serialize>(format: &str, value: &T, text: impl Fn(&T) -> String) -> anyhow::Result<()> {
    let output = match format {
        "json" => serde_json::to_string_pretty(value)?,
        _ => text(value),
    };
    println!("{}", output);
    Ok(())
}

fn format_stats(stats: &GitHubStats) -> String {
    let mut output = String::new();
    output.push_str(&format!("Stars:          {}\n", stats.total_stars));
    output.push_str(&format!("Forks:          {}\n", stats.total_forks));
    output.push_str(&format!("Repositories:   {}\n", stats.total_repos));
    output.push_str(&format!("Followers:      {}\n", stats.followers));
    output.push_str(&format!("Following:      {}\n", stats.following));
    output.push_str(&format!("Contributions:  {}\n", stats.contributions));
    output.push_str(&format!("Current streak: {} days\n", stats.current_streak));
    output.push_str(&format!("Longest streak: {} days\n", stats.longest_streak));
    output
}

fn format_dashboard(dashboard: &Dashboard) -> String {
    let mut output = String::from("\n=== GitHub Stats ===\n\n");
    output.push_str(&format_stats(&dashboard.stats));

    output.push_str("\nTop Repositories:\n");
    output.push_str(&format_repos(&dashboard.top_repositories));

    if !dashboard.languages.is_empty() {
        output.push_str("\nMost Used Languages:\n");
        output.push_str(&format_languages(&dashboard.languages));
    }
    output
}

fn format_repos(repos: &[Repository]) -> String {
    let mut output = String::new();
    for repo in repos {
        output.push_str(&format!(
            "  - {} ({} commits, {} stars, {}): {}\n",
            repo.name,
            repo.commits(),
            repo.stargazers_count,
            repo.language.as_deref().unwrap_or("Unknown"),
            repo.description.as_deref().unwrap_or_default()
        ));
    }
    output
}

fn format_languages(languages: &[LanguageStat]) -> String {
    let total: u32 = languages.iter().map(|l| l.count).sum();
    let mut output = String::new();
    for lang in languages {
        let percentage = if total > 0 {
            lang.count as f32 / total as f32 * 100.0
        } else {
            0.0
        };
        output.push_str(&format!(
            "  {} {:<12} {:>3} repos ({:.0}%)\n",
            lang.color, lang.name, lang.count, percentage
        ));
    }
    output
}

fn format_calendar(view: &CalendarView) -> String {
    const SHADES: [char; 5] = ['.', '-', '+', '*', '#'];
    const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

    let mut output = format!(
        "\n{} contributions in {}\n\n",
        view.reported_total, view.year
    );

    let mut header = vec![' '; view.grid.weeks.len() + 3];
    for label in &view.month_labels {
        for (i, ch) in label.month.chars().enumerate() {
            if let Some(slot) = header.get_mut(label.week_index + i) {
                *slot = ch;
            }
        }
    }
    output.push_str("    ");
    output.push_str(header.iter().collect::<String>().trim_end());
    output.push('\n');

    for (row, weekday) in WEEKDAYS.iter().enumerate() {
        let label = if row % 2 == 1 { *weekday } else { "   " };
        output.push_str(label);
        output.push(' ');
        for week in &view.grid.weeks {
            let day = &week.days[row];
            output.push(if day.in_year {
                SHADES.get(day.level as usize).copied().unwrap_or('#')
            } else {
                ' '
            });
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "\nLess {} More\n",
        SHADES.iter().collect::<String>()
    ));
    output
}
