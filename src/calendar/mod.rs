//! Date arithmetic shared by the grid, the layout and the local data source.

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};

pub mod holidays;
pub mod working_days;

pub use holidays::{easter_sunday, holiday_name, holidays_between, public_holidays};
pub use working_days::{count_working_days, working_days_in_month, HOURS_PER_WORKING_DAY};

/// Wire format for every date exchanged with collaborators.
pub const ISO_DATE: &str = "%Y-%m-%d";

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// Last day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    add_months(month_start(date), 1)
        .pred_opt()
        .unwrap_or(date)
}

/// Shift by whole calendar months. Negative values move backwards.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Signed number of days from `from` to `to` (0 when equal).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// `yyyy-MM`, the key used for monthly buckets and per-month payload maps.
pub fn month_key(year: i32, month: u32) -> String {
    format!("{year}-{month:02}")
}

/// `yyyy-Www`, keyed by the ISO week-year so late-December weeks do not collide.
pub fn week_key(date: NaiveDate) -> String {
    let week = date.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

pub fn format_iso(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}
