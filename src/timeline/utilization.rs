//! Per-bucket utilization for one employee lane.

use std::collections::BTreeMap;

use super::grid::{CalendarGrid, MonthBucket, WeekBucket};
use crate::calendar::HOURS_PER_WORKING_DAY;
use crate::model::{Assignment, Employee, UtilizationRecord};

/// Colour band of a utilization figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    None,
    Normal,
    High,
    /// Overbooked.
    Critical,
}

impl Severity {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > 100.0 {
            Severity::Critical
        } else if percentage > 80.0 {
            Severity::High
        } else if percentage > 0.0 {
            Severity::Normal
        } else {
            Severity::None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Normal => "normal",
            Severity::High => "high",
            Severity::Critical => "overbooked",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BucketUtilization {
    pub key: String,
    pub record: UtilizationRecord,
    pub severity: Severity,
}

impl BucketUtilization {
    fn new(key: String, record: UtilizationRecord) -> Self {
        let severity = Severity::from_percentage(record.percentage.round());
        Self {
            key,
            record,
            severity,
        }
    }

    /// Whole percent shown in the utilization strip. The severity band is taken from this value.
    pub fn display_percentage(&self) -> i64 {
        self.record.percentage.round() as i64
    }
}

/// Relay the source's monthly records, one per month bucket. A missing key reads as 0%.
pub fn monthly<'a>(
    months: impl IntoIterator<Item = &'a MonthBucket>,
    records: &BTreeMap<String, UtilizationRecord>,
) -> Vec<BucketUtilization> {
    months
        .into_iter()
        .map(|month| {
            let key = month.key();
            let record = records.get(&key).copied().unwrap_or_default();
            BucketUtilization::new(key, record)
        })
        .collect()
}

/// Utilization of one week from the daily hours of every assignment active on each working day.
pub fn week(week: &WeekBucket, assignments: &[Assignment]) -> BucketUtilization {
    let mut hours = 0.0;
    let mut working_days = 0u32;
    for day in week.days.iter().filter(|d| d.is_working_day()) {
        working_days += 1;
        hours += assignments
            .iter()
            .filter(|a| a.contains(day.date))
            .map(|a| a.daily_hours)
            .sum::<f64>();
    }

    let available_hours = working_days as f64 * HOURS_PER_WORKING_DAY;
    let percentage = if working_days == 0 {
        0.0
    } else {
        (hours / available_hours * 100.0).round()
    };
    BucketUtilization::new(
        week.key(),
        UtilizationRecord {
            percentage,
            hours,
            available_hours,
            overbooked: percentage > 100.0,
        },
    )
}

pub fn weekly<'a>(
    weeks: impl IntoIterator<Item = &'a WeekBucket>,
    assignments: &[Assignment],
) -> Vec<BucketUtilization> {
    weeks.into_iter().map(|w| week(w, assignments)).collect()
}

/// Utilization strip for `employee` over every bucket of `grid`.
pub fn for_employee(grid: &CalendarGrid, employee: &Employee) -> Vec<BucketUtilization> {
    match grid.zoom() {
        crate::model::ZoomMode::Monthly => monthly(grid.months(), &employee.utilization),
        crate::model::ZoomMode::Weekly => weekly(grid.weeks(), &employee.assignments),
    }
}
