//! Bucket sequence for the visible window.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDate};

use crate::calendar::{self, HOURS_PER_WORKING_DAY};
use crate::model::{TimelineData, TimelineViewState, ZoomMode};

/// One calendar day of a weekly bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub is_weekend: bool,
    pub holiday: Option<String>,
}

impl DayBucket {
    pub fn is_working_day(&self) -> bool {
        !self.is_weekend && self.holiday.is_none()
    }

    pub fn key(&self) -> String {
        calendar::format_iso(self.date)
    }

    /// `"Mon"` etc.
    pub fn weekday_label(&self) -> String {
        self.date.format("%a").to_string()
    }
}

/// An ISO week, Monday to Sunday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekBucket {
    pub iso_week: u32,
    pub days: Vec<DayBucket>,
}

impl WeekBucket {
    fn build(monday: NaiveDate, holidays: &HashMap<NaiveDate, String>) -> Self {
        let days = (0..7)
            .map(|offset| {
                let date = monday + Duration::days(offset);
                DayBucket {
                    date,
                    is_weekend: calendar::is_weekend(date),
                    holiday: holidays.get(&date).cloned(),
                }
            })
            .collect();
        Self {
            iso_week: monday.iso_week().week(),
            days,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.days.first().map(|d| d.date).unwrap_or(NaiveDate::MIN)
    }

    pub fn end(&self) -> NaiveDate {
        self.days.last().map(|d| d.date).unwrap_or(NaiveDate::MIN)
    }

    pub fn key(&self) -> String {
        calendar::week_key(self.start())
    }

    pub fn working_days(&self) -> u32 {
        self.days.iter().filter(|d| d.is_working_day()).count() as u32
    }

    /// `"3-9 Mar"`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.start().day(), self.end().format("%-d %b"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    /// From the fetched payload; 0 when unknown.
    pub working_days: u32,
}

impl MonthBucket {
    pub fn start(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn end(&self) -> NaiveDate {
        calendar::month_end(self.start())
    }

    pub fn key(&self) -> String {
        calendar::month_key(self.year, self.month)
    }

    /// `"March 2025"`.
    pub fn label(&self) -> String {
        self.start().format("%B %Y").to_string()
    }

    pub fn available_hours(&self) -> f64 {
        self.working_days as f64 * HOURS_PER_WORKING_DAY
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bucket {
    Month(MonthBucket),
    Week(WeekBucket),
}

impl Bucket {
    pub fn start(&self) -> NaiveDate {
        match self {
            Bucket::Month(m) => m.start(),
            Bucket::Week(w) => w.start(),
        }
    }

    pub fn end(&self) -> NaiveDate {
        match self {
            Bucket::Month(m) => m.end(),
            Bucket::Week(w) => w.end(),
        }
    }

    pub fn key(&self) -> String {
        match self {
            Bucket::Month(m) => m.key(),
            Bucket::Week(w) => w.key(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Bucket::Month(m) => m.label(),
            Bucket::Week(w) => w.label(),
        }
    }
}

/// Calendar facts layered onto the bare grid: holiday names and monthly working days.
#[derive(Debug, Clone, Default)]
pub struct GridAnnotations {
    pub holidays: HashMap<NaiveDate, String>,
    pub working_days_per_month: BTreeMap<String, u32>,
}

impl GridAnnotations {
    pub fn from_data(data: &TimelineData) -> Self {
        Self {
            holidays: data.holiday_map(),
            working_days_per_month: data.working_days_per_month.clone(),
        }
    }
}

/// The ordered, contiguous buckets of one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    zoom: ZoomMode,
    buckets: Vec<Bucket>,
}

impl CalendarGrid {
    pub fn build(anchor: NaiveDate, zoom: ZoomMode, annotations: &GridAnnotations) -> Self {
        let anchor = zoom.snap(anchor);
        let buckets = (0..zoom.visible_buckets() as i32)
            .map(|i| {
                let start = zoom.shift(anchor, i);
                match zoom {
                    ZoomMode::Monthly => {
                        let key = calendar::month_key(start.year(), start.month());
                        Bucket::Month(MonthBucket {
                            year: start.year(),
                            month: start.month(),
                            working_days: annotations
                                .working_days_per_month
                                .get(&key)
                                .copied()
                                .unwrap_or(0),
                        })
                    }
                    ZoomMode::Weekly => Bucket::Week(WeekBucket::build(start, &annotations.holidays)),
                }
            })
            .collect();
        Self { zoom, buckets }
    }

    pub fn for_view(view: &TimelineViewState, annotations: &GridAnnotations) -> Self {
        Self::build(view.anchor(), view.zoom(), annotations)
    }

    pub fn zoom(&self) -> ZoomMode {
        self.zoom
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn window_start(&self) -> NaiveDate {
        self.buckets.first().map(Bucket::start).unwrap_or(NaiveDate::MIN)
    }

    /// Inclusive last day of the window.
    pub fn window_end(&self) -> NaiveDate {
        self.buckets.last().map(Bucket::end).unwrap_or(NaiveDate::MIN)
    }

    /// Inclusive number of days covered.
    pub fn total_days(&self) -> i64 {
        if self.buckets.is_empty() {
            return 0;
        }
        calendar::days_between(self.window_start(), self.window_end()) + 1
    }

    pub fn months(&self) -> impl Iterator<Item = &MonthBucket> {
        self.buckets.iter().filter_map(|b| match b {
            Bucket::Month(m) => Some(m),
            Bucket::Week(_) => None,
        })
    }

    pub fn weeks(&self) -> impl Iterator<Item = &WeekBucket> {
        self.buckets.iter().filter_map(|b| match b {
            Bucket::Week(w) => Some(w),
            Bucket::Month(_) => None,
        })
    }

    /// Every day cell of a weekly grid, in order. Empty for monthly grids.
    pub fn days(&self) -> impl Iterator<Item = &DayBucket> {
        self.weeks().flat_map(|w| w.days.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn monthly_grid_has_five_contiguous_months() {
        let mut annotations = GridAnnotations::default();
        annotations
            .working_days_per_month
            .insert("2025-02".into(), 20);
        let grid = CalendarGrid::build(d(2024, 11, 1), ZoomMode::Monthly, &annotations);

        let keys: Vec<String> = grid.buckets().iter().map(Bucket::key).collect();
        assert_eq!(keys, ["2024-11", "2024-12", "2025-01", "2025-02", "2025-03"]);
        for pair in grid.buckets().windows(2) {
            assert_eq!(pair[0].end() + Duration::days(1), pair[1].start());
        }
        let feb = grid.months().nth(3).unwrap();
        assert_eq!(feb.working_days, 20);
        assert_eq!(feb.available_hours(), 160.0);
        assert_eq!(grid.months().next().unwrap().working_days, 0);
        assert_eq!(grid.window_end(), d(2025, 3, 31));
        assert_eq!(grid.total_days(), 30 + 31 + 31 + 28 + 31);
        assert_eq!(grid.buckets()[0].label(), "November 2024");
    }

    #[test]
    fn weekly_grid_has_four_iso_weeks() {
        let mut annotations = GridAnnotations::default();
        annotations
            .holidays
            .insert(d(2025, 4, 21), "Easter Monday".into());
        let grid = CalendarGrid::build(d(2025, 4, 14), ZoomMode::Weekly, &annotations);

        assert_eq!(grid.len(), 4);
        assert_eq!(grid.days().count(), 28);
        assert_eq!(grid.total_days(), 28);
        let weeks: Vec<&WeekBucket> = grid.weeks().collect();
        assert_eq!(weeks[0].iso_week, 16);
        assert_eq!(weeks[0].key(), "2025-W16");
        assert_eq!(weeks[0].label(), "14-20 Apr");
        assert_eq!(weeks[0].working_days(), 5);
        assert_eq!(weeks[1].working_days(), 4);
        assert_eq!(
            weeks[1].days[0].holiday.as_deref(),
            Some("Easter Monday")
        );
        assert!(weeks[1].days[5].is_weekend);
        assert_eq!(weeks[0].days[0].weekday_label(), "Mon");
        assert_eq!(grid.window_end(), d(2025, 5, 11));
    }

    #[test]
    fn unsnapped_anchor_is_snapped() {
        let grid = CalendarGrid::build(d(2025, 4, 17), ZoomMode::Weekly, &GridAnnotations::default());
        assert_eq!(grid.window_start(), d(2025, 4, 14));
    }
}
