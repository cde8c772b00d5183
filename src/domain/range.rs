use chrono::{Months, NaiveDate};

use super::Interval;

pub const DATE_FMT: &str = "%Y-%m-%d";

/// Inclusive calendar range requested from the history endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn start_param(&self) -> String {
        self.start.format(DATE_FMT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(DATE_FMT).to_string()
    }
}

/// Derive the request range for `interval` ending on `today`.
///
/// Month arithmetic is chrono's: a day that does not exist in the target month is clamped
/// to that month's last day (2024-03-31 minus one month is 2024-02-29).
pub fn date_range(interval: Interval, today: NaiveDate) -> DateRange {
    let start = today
        .checked_sub_months(Months::new(interval.months()))
        .unwrap_or(NaiveDate::MIN);
    DateRange { start, end: today }
}
