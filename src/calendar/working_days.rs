use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate};

use super::{is_weekend, month_end, public_holidays};

/// Capacity of one working day, in hours.
pub const HOURS_PER_WORKING_DAY: f64 = 8.0;

/// Working days (Mon–Fri minus public holidays) in `[start, end]`.
pub fn working_days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if end < start {
        return Vec::new();
    }
    let holidays: HashSet<NaiveDate> = (start.year()..=end.year())
        .flat_map(public_holidays)
        .map(|(date, _)| date)
        .collect();

    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        if !is_weekend(current) && !holidays.contains(&current) {
            days.push(current);
        }
        current += Duration::days(1);
    }
    days
}

pub fn count_working_days(start: NaiveDate, end: NaiveDate) -> u32 {
    working_days_between(start, end).len() as u32
}

pub fn working_days_in_month(year: i32, month: u32) -> u32 {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(first) => count_working_days(first, month_end(first)),
        None => 0,
    }
}
