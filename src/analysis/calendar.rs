use chrono::{Datelike, Duration, NaiveDate};
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::models::{
    CalendarDay, CalendarGrid, CalendarView, CalendarWeek, ContributionDay, ContributionYear,
    MonthLabel,
};

pub const MAX_LEVEL: u8 = 4;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Heat-map intensity of `count` relative to the grid's busiest day.
pub fn contribution_level(count: u32, max_count: u32) -> u8 {
    if count == 0 || max_count == 0 {
        return 0;
    }
    if max_count == 1 {
        return 1;
    }

    let ratio = count as f64 / max_count as f64;
    if ratio <= 0.25 {
        1
    } else if ratio <= 0.5 {
        2
    } else if ratio <= 0.75 {
        3
    } else {
        MAX_LEVEL
    }
}

fn first_of_year(year: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1).ok_or(Error::InvalidYear(year))
}

/// The Sunday on or before January 1.
pub fn grid_start(year: i32) -> Result<NaiveDate> {
    let jan_first = first_of_year(year)?;
    let back = jan_first.weekday().num_days_from_sunday();
    jan_first
        .checked_sub_signed(Duration::days(back as i64))
        .ok_or(Error::InvalidYear(year))
}

/// Lays `days` out in Sunday-first week columns covering the whole of `year`.
///
/// Dates without an entry in `days` count as zero. The final week is padded
/// with the following dates at zero.
pub fn build_grid(year: i32, days: &[ContributionDay]) -> Result<CalendarGrid> {
    let start = grid_start(year)?;
    let end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(Error::InvalidYear(year))?;

    let counts: HashMap<NaiveDate, u32> = days.iter().map(|d| (d.date, d.count)).collect();

    let mut slots = Vec::new();
    let mut date = start;
    while date <= end || slots.len() % 7 != 0 {
        let in_year = date.year() == year;
        let count = if date <= end {
            counts.get(&date).copied().unwrap_or(0)
        } else {
            0
        };
        slots.push(CalendarDay {
            date,
            count,
            level: 0,
            in_year,
        });
        date = date
            .checked_add_signed(Duration::days(1))
            .ok_or(Error::InvalidYear(year))?;
    }

    let max_count = slots.iter().map(|d| d.count).max().unwrap_or(0);
    for slot in &mut slots {
        slot.level = contribution_level(slot.count, max_count);
    }

    let weeks = slots
        .chunks_exact(7)
        .map(|chunk| CalendarWeek {
            days: std::array::from_fn(|i| chunk[i]),
        })
        .collect();

    Ok(CalendarGrid {
        year,
        start,
        max_count,
        weeks,
    })
}

/// Week column at which each month's label anchors.
pub fn month_label_positions(year: i32, start: NaiveDate) -> Result<Vec<MonthLabel>> {
    MONTHS
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let first = NaiveDate::from_ymd_opt(year, i as u32 + 1, 1)
                .ok_or(Error::InvalidYear(year))?;
            let offset = (first - start).num_days().max(0) as usize;
            Ok(MonthLabel {
                month: name.to_string(),
                week_index: offset / 7,
            })
        })
        .collect()
}

pub fn calendar_view(contributions: &ContributionYear) -> Result<CalendarView> {
    let grid = build_grid(contributions.year, &contributions.days)?;
    let month_labels = month_label_positions(contributions.year, grid.start)?;

    let local_total = grid.total();
    if local_total != contributions.total_contributions {
        tracing::debug!(
            "Reported total {} differs from summed total {} for {}",
            contributions.total_contributions,
            local_total,
            contributions.year
        );
    }

    Ok(CalendarView {
        year: contributions.year,
        reported_total: contributions.total_contributions,
        local_total,
        grid,
        month_labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_levels_are_relative_to_max() {
        let days = vec![
            ContributionDay::new(date(2024, 1, 1), 0),
            ContributionDay::new(date(2024, 1, 2), 3),
            ContributionDay::new(date(2024, 1, 3), 5),
        ];
        let grid = build_grid(2024, &days).unwrap();
        assert_eq!(grid.max_count, 5);

        let level_of = |d: NaiveDate| grid.days().find(|s| s.date == d).unwrap().level;
        assert_eq!(level_of(date(2024, 1, 1)), 0);
        assert_eq!(level_of(date(2024, 1, 2)), 3);
        assert_eq!(level_of(date(2024, 1, 3)), 4);
    }

    #[test]
    fn test_level_edge_cases() {
        assert_eq!(contribution_level(0, 0), 0);
        assert_eq!(contribution_level(0, 10), 0);
        assert_eq!(contribution_level(1, 1), 1);
        assert_eq!(contribution_level(1, 4), 1);
        assert_eq!(contribution_level(2, 4), 2);
        assert_eq!(contribution_level(3, 4), 3);
        assert_eq!(contribution_level(4, 4), 4);
    }

    #[test]
    fn test_level_is_monotonic_in_count() {
        for max in 0..40 {
            let mut last = 0;
            for count in 0..=max {
                let level = contribution_level(count, max);
                assert!(level >= last, "count {} max {}", count, max);
                assert!(level <= MAX_LEVEL);
                last = level;
            }
        }
    }

    #[test]
    fn test_all_zero_series_is_level_zero() {
        let grid = build_grid(2023, &[]).unwrap();
        assert_eq!(grid.max_count, 0);
        assert!(grid.days().all(|d| d.level == 0));
    }

    #[test]
    fn test_grid_shape_and_alignment() {
        for year in [2021, 2022, 2023, 2024, 2025, 2026] {
            let grid = build_grid(year, &[]).unwrap();
            assert_eq!(grid.start.weekday(), Weekday::Sun);
            assert_eq!(grid.days().count(), grid.slot_count());
            assert!(grid.weeks.len() == 53 || grid.weeks.len() == 54);

            let last = grid.weeks.last().unwrap().days[6].date;
            assert_eq!(last.weekday(), Weekday::Sat);
            assert!(last >= date(year, 12, 31));
        }
    }

    #[test]
    fn test_grid_dates_are_contiguous() {
        let grid = build_grid(2024, &[]).unwrap();
        let dates: Vec<NaiveDate> = grid.days().map(|d| d.date).collect();
        for pair in dates.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }

        let in_year = grid.days().filter(|d| d.in_year).count();
        assert_eq!(in_year, 366);
        assert_eq!(grid.days().find(|d| d.in_year).unwrap().date, date(2024, 1, 1));
    }

    #[test]
    fn test_grid_start_when_year_begins_on_sunday() {
        // 2023-01-01 was a Sunday.
        assert_eq!(grid_start(2023).unwrap(), date(2023, 1, 1));
        // 2024-01-01 was a Monday.
        assert_eq!(grid_start(2024).unwrap(), date(2023, 12, 31));
    }

    #[test]
    fn test_padding_days_are_zero() {
        let days = vec![ContributionDay::new(date(2025, 1, 1), 7)];
        let grid = build_grid(2025, &days).unwrap();
        let padding: Vec<_> = grid.days().filter(|d| d.date > date(2025, 12, 31)).collect();
        assert!(!padding.is_empty());
        assert!(padding.iter().all(|d| d.count == 0 && d.level == 0 && !d.in_year));
        assert_eq!(grid.total(), 7);
    }

    #[test]
    fn test_month_labels() {
        let start = grid_start(2024).unwrap();
        let labels = month_label_positions(2024, start).unwrap();
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0].month, "Jan");
        assert_eq!(labels[0].week_index, 0);
        // Feb 1 2024 is 32 days after Dec 31 2023.
        assert_eq!(labels[1].week_index, 4);
        assert_eq!(labels[11].month, "Dec");
        for pair in labels.windows(2) {
            assert!(pair[1].week_index > pair[0].week_index);
        }
    }

    #[test]
    fn test_calendar_view_totals() {
        let contributions = ContributionYear {
            year: 2024,
            total_contributions: 10,
            days: vec![
                ContributionDay::new(date(2024, 5, 1), 4),
                ContributionDay::new(date(2024, 5, 2), 4),
            ],
        };
        let view = calendar_view(&contributions).unwrap();
        assert_eq!(view.reported_total, 10);
        assert_eq!(view.local_total, 8);
        assert_eq!(view.month_labels.len(), 12);
    }

    #[test]
    fn test_invalid_year() {
        assert!(matches!(build_grid(i32::MAX, &[]), Err(Error::InvalidYear(_))));
    }

    #[test]
    fn test_years_at_the_date_range_edges_are_rejected() {
        let last = NaiveDate::MAX.year();
        let first = NaiveDate::MIN.year();
        assert!(matches!(build_grid(last, &[]), Err(Error::InvalidYear(y)) if y == last));
        assert!(matches!(build_grid(first, &[]), Err(Error::InvalidYear(y)) if y == first));
    }
}
