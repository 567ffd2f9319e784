//! Date ↔ pixel mapping for the visible window.
//!
//! [`TimelineScale`] is the single source of `px_per_day`: bar layout, header ticks and the
//! resize gesture all read it from the same value, so a preview and its committed date never
//! disagree.

use chrono::NaiveDate;

use super::grid::CalendarGrid;
use crate::calendar::days_between;
use crate::model::ZoomMode;

/// Width of one month column in the monthly view.
pub const MONTH_WIDTH: f32 = 200.0;
/// Width of one day column in the weekly view.
pub const DAY_WIDTH: f32 = 40.0;

/// Horizontal placement of a bar, relative to the window's left edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub left: f32,
    pub width: f32,
}

impl BarGeometry {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Whether the half-open intervals `[left, right)` intersect.
    pub fn overlaps(&self, other: &BarGeometry) -> bool {
        self.left < other.right() && other.left < self.right()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineScale {
    zoom: ZoomMode,
    window_start: NaiveDate,
    window_end: NaiveDate,
    total_width: f32,
    px_per_day: f32,
}

impl TimelineScale {
    pub fn for_grid(grid: &CalendarGrid) -> Self {
        let zoom = grid.zoom();
        let unit_width = match zoom {
            ZoomMode::Monthly => MONTH_WIDTH,
            ZoomMode::Weekly => 7.0 * DAY_WIDTH,
        };
        let total_width = grid.len() as f32 * unit_width;
        let total_days = grid.total_days();
        let px_per_day = match zoom {
            ZoomMode::Monthly if total_days > 0 => total_width / total_days as f32,
            ZoomMode::Monthly => 1.0,
            ZoomMode::Weekly => DAY_WIDTH,
        };
        Self {
            zoom,
            window_start: grid.window_start(),
            window_end: grid.window_end(),
            total_width,
            px_per_day,
        }
    }

    pub fn zoom(&self) -> ZoomMode {
        self.zoom
    }

    pub fn window_start(&self) -> NaiveDate {
        self.window_start
    }

    pub fn window_end(&self) -> NaiveDate {
        self.window_end
    }

    pub fn total_width(&self) -> f32 {
        self.total_width
    }

    pub fn px_per_day(&self) -> f32 {
        self.px_per_day
    }

    /// Clip `[start, end]` to the window and project it to pixels.
    ///
    /// Returns `None` when the interval lies entirely outside the window.
    pub fn position(&self, start: NaiveDate, end: NaiveDate) -> Option<BarGeometry> {
        let visible_start = start.max(self.window_start);
        let visible_end = end.min(self.window_end);
        if visible_end < visible_start {
            return None;
        }
        let left_days = days_between(self.window_start, visible_start);
        let span_days = days_between(visible_start, visible_end) + 1;
        Some(BarGeometry {
            left: left_days as f32 * self.px_per_day,
            width: span_days as f32 * self.px_per_day,
        })
    }

    /// Left edge of `date`'s day column.
    pub fn date_to_x(&self, date: NaiveDate) -> f32 {
        days_between(self.window_start, date) as f32 * self.px_per_day
    }

    /// Whole days represented by a horizontal pointer movement.
    pub fn days_for_delta(&self, delta_x: f32) -> i64 {
        (delta_x / self.px_per_day).round() as i64
    }
}
