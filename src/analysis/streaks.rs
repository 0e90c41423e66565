use chrono::NaiveDate;

use crate::models::ContributionDay;

/// Consecutive contributing days ending today or yesterday.
///
/// `days` must be sorted ascending by date. Trailing zero-count days (the
/// not-yet-elapsed part of the year, or today before the first commit) are
/// skipped until the most recent contributing day; if that day lies more than
/// one day before `today` the streak is broken.
pub fn current_streak(days: &[ContributionDay], today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut previous: Option<NaiveDate> = None;

    for day in days.iter().rev() {
        if day.count > 0 {
            match previous {
                None => {
                    if (today - day.date).num_days() > 1 {
                        break;
                    }
                    streak = 1;
                }
                Some(prev) if (prev - day.date).num_days() == 1 => streak += 1,
                Some(_) => break,
            }
            previous = Some(day.date);
        } else if streak > 0 {
            break;
        }
    }

    streak
}

/// Longest run of contributing days inside `days` (sorted ascending).
///
/// Only the given series is considered, so a run crossing from December of
/// the previous year into January is counted from January 1.
pub fn longest_streak(days: &[ContributionDay]) -> u32 {
    let mut longest = 0;
    let mut running = 0;
    let mut previous: Option<NaiveDate> = None;

    for day in days {
        let contiguous = previous.map_or(true, |prev| (day.date - prev).num_days() == 1);
        if day.count > 0 {
            running = if contiguous { running + 1 } else { 1 };
            longest = longest.max(running);
        } else {
            running = 0;
        }
        previous = Some(day.date);
    }

    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn series(start: NaiveDate, counts: &[u32]) -> Vec<ContributionDay> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| ContributionDay::new(start + Duration::days(i as i64), count))
            .collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_current_streak_ending_today() {
        // Jun 1..=Jun 6
        let days = series(date(2024, 6, 1), &[1, 0, 2, 3, 1, 4]);
        assert_eq!(current_streak(&days, date(2024, 6, 6)), 4);
    }

    #[test]
    fn test_current_streak_ending_yesterday() {
        let days = series(date(2024, 6, 1), &[1, 2, 3, 0]);
        assert_eq!(current_streak(&days, date(2024, 6, 4)), 3);
    }

    #[test]
    fn test_current_streak_broken_by_old_activity() {
        let days = series(date(2024, 6, 1), &[5, 5, 0, 0]);
        assert_eq!(current_streak(&days, date(2024, 6, 4)), 0);
    }

    #[test]
    fn test_current_streak_skips_future_zero_days() {
        // The calendar for the current year runs to Dec 31.
        let mut counts = vec![0, 3, 3];
        counts.extend(std::iter::repeat(0).take(10));
        let days = series(date(2024, 6, 1), &counts);
        assert_eq!(current_streak(&days, date(2024, 6, 3)), 2);
    }

    #[test]
    fn test_streaks_of_empty_series() {
        assert_eq!(current_streak(&[], date(2024, 1, 1)), 0);
        assert_eq!(longest_streak(&[]), 0);
    }

    #[test]
    fn test_longest_streak() {
        let days = series(date(2024, 1, 1), &[1, 1, 0, 1, 1, 1, 0, 2]);
        assert_eq!(longest_streak(&days), 3);
        assert_eq!(longest_streak(&days), longest_streak(&days));
    }

    #[test]
    fn test_longest_streak_does_not_bridge_missing_dates() {
        let mut days = series(date(2024, 1, 1), &[1, 1]);
        days.extend(series(date(2024, 1, 10), &[1, 1, 1]));
        assert_eq!(longest_streak(&days), 3);
    }

    #[test]
    fn test_longest_streak_is_scoped_to_the_series() {
        // A run spanning the new year only counts its January part.
        let days = series(date(2024, 1, 1), &[1, 1, 0]);
        assert_eq!(longest_streak(&days), 2);
    }
}
