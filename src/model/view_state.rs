use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{add_months, month_end, month_start, week_start};

/// Granularity of the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomMode {
    #[default]
    Monthly,
    Weekly,
}

impl ZoomMode {
    pub const ALL: [ZoomMode; 2] = [ZoomMode::Monthly, ZoomMode::Weekly];

    /// Number of buckets in the visible window.
    pub fn visible_buckets(self) -> usize {
        match self {
            ZoomMode::Monthly => 5,
            ZoomMode::Weekly => 4,
        }
    }

    /// Start of the bucket containing `date`.
    pub fn snap(self, date: NaiveDate) -> NaiveDate {
        match self {
            ZoomMode::Monthly => month_start(date),
            ZoomMode::Weekly => week_start(date),
        }
    }

    /// Move a bucket start by whole buckets.
    pub fn shift(self, anchor: NaiveDate, buckets: i32) -> NaiveDate {
        match self {
            ZoomMode::Monthly => add_months(anchor, buckets),
            ZoomMode::Weekly => anchor + Duration::weeks(buckets as i64),
        }
    }

    /// Inclusive last day of the window anchored at `anchor`.
    pub fn window_end(self, anchor: NaiveDate) -> NaiveDate {
        let last_bucket = self.shift(anchor, self.visible_buckets() as i32 - 1);
        match self {
            ZoomMode::Monthly => month_end(last_bucket),
            ZoomMode::Weekly => last_bucket + Duration::days(6),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ZoomMode::Monthly => "Months",
            ZoomMode::Weekly => "Weeks",
        }
    }
}

/// Parameters of a timeline fetch. Two fetches are interchangeable iff their queries are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimelineQuery {
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub zoom: ZoomMode,
    /// Sorted; empty means every team.
    pub teams: Vec<String>,
    pub search: String,
}

/// Window position, zoom and filters of the timeline.
///
/// Transitions never mutate in place; each returns the next state. The anchor is private so
/// that it can only ever hold a bucket start for the active zoom mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineViewState {
    zoom: ZoomMode,
    anchor: NaiveDate,
    teams: BTreeSet<String>,
    search: String,
}

impl TimelineViewState {
    pub fn new(zoom: ZoomMode, today: NaiveDate) -> Self {
        Self {
            zoom,
            anchor: zoom.snap(today),
            teams: BTreeSet::new(),
            search: String::new(),
        }
    }

    pub fn zoom(&self) -> ZoomMode {
        self.zoom
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn teams(&self) -> &BTreeSet<String> {
        &self.teams
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn window_start(&self) -> NaiveDate {
        self.anchor
    }

    pub fn window_end(&self) -> NaiveDate {
        self.zoom.window_end(self.anchor)
    }

    /// Switch granularity, keeping the bucket that contains the current anchor in view.
    #[must_use]
    pub fn set_zoom_mode(&self, zoom: ZoomMode) -> Self {
        Self {
            zoom,
            anchor: zoom.snap(self.anchor),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn scroll_forward(&self) -> Self {
        self.scroll_by(1)
    }

    #[must_use]
    pub fn scroll_back(&self) -> Self {
        self.scroll_by(-1)
    }

    #[must_use]
    pub fn scroll_by(&self, buckets: i32) -> Self {
        Self {
            anchor: self.zoom.shift(self.anchor, buckets),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn go_to_today(&self, today: NaiveDate) -> Self {
        self.set_anchor(today)
    }

    /// Jump to the bucket containing `date`.
    #[must_use]
    pub fn set_anchor(&self, date: NaiveDate) -> Self {
        Self {
            anchor: self.zoom.snap(date),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn set_team_filter<I, S>(&self, teams: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            teams: teams.into_iter().map(Into::into).collect(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn toggle_team(&self, team: &str) -> Self {
        let mut teams = self.teams.clone();
        if !teams.remove(team) {
            teams.insert(team.to_string());
        }
        Self {
            teams,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn set_search(&self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self.clone()
        }
    }

    /// Fetch key for the current window and filters.
    pub fn query(&self) -> TimelineQuery {
        TimelineQuery {
            window_start: self.window_start(),
            window_end: self.window_end(),
            zoom: self.zoom,
            teams: self.teams.iter().cloned().collect(),
            search: self.search.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn new_state_is_snapped() {
        let monthly = TimelineViewState::new(ZoomMode::Monthly, d(2025, 3, 19));
        assert_eq!(monthly.anchor(), d(2025, 3, 1));
        let weekly = TimelineViewState::new(ZoomMode::Weekly, d(2025, 3, 19));
        assert_eq!(weekly.anchor(), d(2025, 3, 17));
    }

    #[test]
    fn zoom_switch_resnaps_anchor() {
        let weekly = TimelineViewState::new(ZoomMode::Weekly, d(2025, 4, 2));
        assert_eq!(weekly.anchor(), d(2025, 3, 31));

        // Monday 31 March lies in March, so the monthly window starts there
        let monthly = weekly.set_zoom_mode(ZoomMode::Monthly);
        assert_eq!(monthly.anchor(), d(2025, 3, 1));

        let back = monthly.set_zoom_mode(ZoomMode::Weekly);
        assert_eq!(back.anchor(), d(2025, 2, 24));
    }

    #[test]
    fn scrolling_moves_one_bucket() {
        let monthly = TimelineViewState::new(ZoomMode::Monthly, d(2025, 12, 10));
        assert_eq!(monthly.scroll_forward().anchor(), d(2026, 1, 1));
        assert_eq!(monthly.scroll_back().anchor(), d(2025, 11, 1));

        let weekly = TimelineViewState::new(ZoomMode::Weekly, d(2025, 12, 31));
        assert_eq!(weekly.anchor(), d(2025, 12, 29));
        assert_eq!(weekly.scroll_forward().anchor(), d(2026, 1, 5));
        assert_eq!(weekly.scroll_back().anchor(), d(2025, 12, 22));
    }

    #[test]
    fn go_to_today_snaps_to_containing_bucket() {
        let state = TimelineViewState::new(ZoomMode::Weekly, d(2024, 1, 1));
        assert_eq!(state.go_to_today(d(2025, 3, 9)).anchor(), d(2025, 3, 3));
    }

    #[test]
    fn window_bounds() {
        let monthly = TimelineViewState::new(ZoomMode::Monthly, d(2025, 1, 15));
        assert_eq!(monthly.window_start(), d(2025, 1, 1));
        assert_eq!(monthly.window_end(), d(2025, 5, 31));

        let weekly = TimelineViewState::new(ZoomMode::Weekly, d(2025, 3, 3));
        assert_eq!(weekly.window_end(), d(2025, 3, 30));
    }

    #[test]
    fn filters_feed_the_query() {
        let state = TimelineViewState::new(ZoomMode::Monthly, d(2025, 1, 1))
            .set_team_filter(["QA", "Backend"])
            .toggle_team("QA")
            .toggle_team("DevOps")
            .set_search("  kowal ");
        let query = state.query();
        assert_eq!(query.teams, vec!["Backend".to_string(), "DevOps".to_string()]);
        assert_eq!(query.search, "kowal");
        assert_eq!(query.window_start, d(2025, 1, 1));
        assert_eq!(query.zoom, ZoomMode::Monthly);
    }

    #[test]
    fn transitions_do_not_touch_the_original() {
        let state = TimelineViewState::new(ZoomMode::Monthly, d(2025, 1, 1));
        let _ = state.scroll_forward().set_search("x");
        assert_eq!(state.anchor(), d(2025, 1, 1));
        assert_eq!(state.search(), "");
    }
}
