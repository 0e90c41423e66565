use std::collections::HashMap;

use crate::models::{LanguageStat, Repository, NO_DESCRIPTION};
use crate::taxonomy::language_color;

pub const LANGUAGE_LIMIT: usize = 10;

/// The `limit` repositories with the most commits. Ties keep fetch order and
/// missing descriptions get a placeholder.
pub fn top_repositories(repos: &[Repository], limit: usize) -> Vec<Repository> {
    let mut ranked: Vec<Repository> = repos.iter().filter(|r| !r.fork).cloned().collect();
    ranked.sort_by(|a, b| b.commits().cmp(&a.commits()));

    ranked
        .into_iter()
        .take(limit)
        .map(|mut repo| {
            if repo.description.as_deref().map_or(true, str::is_empty) {
                repo.description = Some(NO_DESCRIPTION.to_string());
            }
            repo
        })
        .collect()
}

/// Primary-language histogram, most used first, capped at [`LANGUAGE_LIMIT`].
pub fn language_stats(repos: &[Repository]) -> Vec<LanguageStat> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, u32)> = Vec::new();

    for language in repos
        .iter()
        .filter(|r| !r.fork)
        .filter_map(|r| r.language.as_deref())
    {
        match positions.get(language) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                positions.insert(language, counts.len());
                counts.push((language, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(LANGUAGE_LIMIT)
        .map(|(name, count)| LanguageStat {
            name: name.to_string(),
            count,
            color: language_color(name).to_string(),
        })
        .collect()
}
