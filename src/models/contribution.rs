use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: NaiveDate,
    #[serde(alias = "contributionCount")]
    pub count: u32,
}

impl ContributionDay {
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self { date, count }
    }
}

/// One calendar year of daily contribution counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionYear {
    pub year: i32,
    /// Total as reported by the API, kept alongside the days as a cross-check.
    pub total_contributions: u32,
    pub days: Vec<ContributionDay>,
}

impl ContributionYear {
    /// Sum of the day series. Always consistent with `days`, unlike the
    /// reported total.
    pub fn local_total(&self) -> u32 {
        self.days.iter().map(|d| d.count).sum()
    }

    pub fn totals_match(&self) -> bool {
        self.local_total() == self.total_contributions
    }

    /// Days in ascending date order, as the streak scans require.
    pub fn sorted_days(&self) -> Vec<ContributionDay> {
        let mut days = self.days.clone();
        days.sort_by_key(|d| d.date);
        days
    }
}

/// A single slot of the week-aligned heat-map grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub count: u32,
    /// Intensity bucket in `0..=4`.
    pub level: u8,
    /// False for the lead-in days of the previous year and the padding after
    /// December 31.
    pub in_year: bool,
}

/// Seven slots, Sunday first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarWeek {
    pub days: [CalendarDay; 7],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarGrid {
    pub year: i32,
    pub start: NaiveDate,
    pub max_count: u32,
    pub weeks: Vec<CalendarWeek>,
}

impl CalendarGrid {
    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.weeks.iter().flat_map(|w| w.days.iter())
    }

    pub fn slot_count(&self) -> usize {
        self.weeks.len() * 7
    }

    /// Contributions summed over the slots that belong to the grid's year.
    pub fn total(&self) -> u32 {
        self.days().filter(|d| d.in_year).map(|d| d.count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthLabel {
    pub month: String,
    pub week_index: usize,
}

/// Everything the contribution graph needs for one selected year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarView {
    pub year: i32,
    pub reported_total: u32,
    pub local_total: u32,
    pub grid: CalendarGrid,
    pub month_labels: Vec<MonthLabel>,
}
