/// Shown for languages missing from [`LANGUAGE_COLORS`].
pub const FALLBACK_COLOR: &str = "#586069";

pub const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("TypeScript", "#3178c6"),
    ("JavaScript", "#f1e05a"),
    ("Python", "#3572A5"),
    ("React", "#61dafb"),
    ("CSS", "#563d7c"),
    ("HTML", "#e34c26"),
    ("Java", "#b07219"),
    ("C++", "#f34b7d"),
    ("C", "#555555"),
    ("Go", "#00ADD8"),
    ("Rust", "#dea584"),
    ("Vue", "#41b883"),
    ("Angular", "#dd0031"),
    ("Swift", "#ffac45"),
    ("Kotlin", "#f18e33"),
];

pub fn language_color(language: &str) -> &'static str {
    LANGUAGE_COLORS
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}
