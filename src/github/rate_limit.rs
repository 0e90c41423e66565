use chrono::{DateTime, Local, TimeZone, Utc};
use reqwest::header::HeaderMap;

pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";
pub const RESET_HEADER: &str = "x-ratelimit-reset";

/// Reads the epoch-seconds reset instant GitHub sends with every response.
pub fn reset_from_headers(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    headers
        .get(RESET_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<i64>().ok())
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
}

pub fn remaining_from_headers(headers: &HeaderMap) -> Option<u32> {
    headers
        .get(REMAINING_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Human-readable local wall-clock time of the reset, or "unknown".
pub fn describe_reset(reset_at: &Option<DateTime<Utc>>) -> String {
    match reset_at {
        Some(at) => at.with_timezone(&Local).format("%H:%M:%S").to_string(),
        None => "unknown".to_string(),
    }
}
