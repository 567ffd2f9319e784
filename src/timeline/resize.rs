//! Edge-drag resizing of assignment bars.
//!
//! A resize session owns the global pointer capture from pointer-down until it ends. The capture
//! is released on commit, on cancel, and when the controller is dropped mid-gesture.

use chrono::Duration;
use tracing::debug;

use super::interaction::{GestureKind, InteractionSession, PointerCapture, PointerPos};
use super::patch::{AssignmentPatch, Edge, PatchIntent};
use super::position::{BarGeometry, TimelineScale};
use crate::model::{Assignment, AssignmentId};

/// Narrowest a bar may be drawn while resizing.
pub const MIN_PREVIEW_WIDTH: f32 = 20.0;

/// Live bar geometry while an edge is being dragged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizePreview {
    pub assignment_id: AssignmentId,
    pub edge: Edge,
    pub geometry: BarGeometry,
    /// Whole days the edge would move if released now.
    pub days_delta: i64,
}

#[derive(Debug, Clone)]
struct ResizeSession {
    interaction: InteractionSession,
    edge: Edge,
    base: BarGeometry,
    assignment: Assignment,
}

#[derive(Debug, Clone, Default)]
enum ResizeState {
    #[default]
    Idle,
    Resizing(Box<ResizeSession>),
}

pub struct ResizeController<C: PointerCapture> {
    capture: C,
    state: ResizeState,
    suppressed_click: Option<AssignmentId>,
}

impl<C: PointerCapture> ResizeController<C> {
    pub fn new(capture: C) -> Self {
        Self {
            capture,
            state: ResizeState::Idle,
            suppressed_click: None,
        }
    }

    pub fn capture(&self) -> &C {
        &self.capture
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.state, ResizeState::Resizing(_))
    }

    /// Pointer-down on an edge handle. Refused while another resize is running.
    pub fn begin(
        &mut self,
        assignment: &Assignment,
        base: BarGeometry,
        edge: Edge,
        origin: PointerPos,
    ) -> bool {
        if self.is_resizing() {
            return false;
        }
        let kind = match edge {
            Edge::Left => GestureKind::ResizeLeft,
            Edge::Right => GestureKind::ResizeRight,
        };
        self.capture.acquire();
        self.state = ResizeState::Resizing(Box::new(ResizeSession {
            interaction: InteractionSession::new(kind, assignment.id, origin),
            edge,
            base,
            assignment: assignment.clone(),
        }));
        debug!(assignment = %assignment.id, ?edge, "resize started");
        true
    }

    /// Pointer-move while captured.
    pub fn update(&mut self, pointer: PointerPos) {
        if let ResizeState::Resizing(session) = &mut self.state {
            session.interaction.track(pointer);
        }
    }

    pub fn preview(&self, scale: &TimelineScale) -> Option<ResizePreview> {
        let ResizeState::Resizing(session) = &self.state else {
            return None;
        };
        let delta = session.interaction.delta.x;
        let base = session.base;
        let geometry = match session.edge {
            Edge::Left => BarGeometry {
                left: base.left + delta,
                width: (base.width - delta).max(MIN_PREVIEW_WIDTH),
            },
            Edge::Right => BarGeometry {
                left: base.left,
                width: (base.width + delta).max(MIN_PREVIEW_WIDTH),
            },
        };
        Some(ResizePreview {
            assignment_id: session.interaction.subject,
            edge: session.edge,
            geometry,
            days_delta: scale.days_for_delta(delta),
        })
    }

    /// Pointer-up. Releases the capture and returns the patch to send, if the edge moved by at
    /// least one whole day.
    pub fn finish(&mut self, scale: &TimelineScale) -> Option<PatchIntent> {
        let ResizeState::Resizing(session) = std::mem::take(&mut self.state) else {
            return None;
        };
        self.capture.release();
        self.suppressed_click = Some(session.interaction.subject);

        let delta = session.interaction.delta.x;
        if delta.abs() < 0.5 * scale.px_per_day() {
            debug!(assignment = %session.assignment.id, delta, "resize below half a day discarded");
            return None;
        }
        let days_delta = scale.days_for_delta(delta);
        if days_delta == 0 {
            return None;
        }

        let shift = Duration::days(days_delta);
        let patch = match session.edge {
            Edge::Left => AssignmentPatch::start_date(session.assignment.start + shift),
            Edge::Right => AssignmentPatch::end_date(session.assignment.end + shift),
        };
        Some(PatchIntent::Resize {
            assignment_id: session.assignment.id,
            edge: session.edge,
            days_delta,
            patch,
        })
    }

    /// Abort the gesture without emitting anything.
    pub fn cancel(&mut self) {
        if let ResizeState::Resizing(session) = std::mem::take(&mut self.state) {
            self.capture.release();
            debug!(assignment = %session.interaction.subject, "resize cancelled");
        }
    }

    /// Consume the one-shot click suppression left by the last resize on `id`.
    pub fn take_suppressed_click(&mut self, id: AssignmentId) -> bool {
        if self.suppressed_click == Some(id) {
            self.suppressed_click = None;
            true
        } else {
            false
        }
    }

    /// Drop any suppression that was not consumed during the frame the resize ended in.
    pub fn end_frame(&mut self) {
        if !self.is_resizing() {
            self.suppressed_click = None;
        }
    }
}

impl<C: PointerCapture> Drop for ResizeController<C> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;
    use crate::model::{AllocationKind, ProjectColor, ZoomMode};
    use crate::timeline::grid::{CalendarGrid, GridAnnotations};

    /// Capture that counts acquisitions and releases through a shared handle.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct CountingCapture {
        pub held: Rc<Cell<i32>>,
        pub releases: Rc<Cell<u32>>,
    }

    impl PointerCapture for CountingCapture {
        fn acquire(&mut self) {
            self.held.set(self.held.get() + 1);
        }

        fn release(&mut self) {
            self.held.set(self.held.get() - 1);
            self.releases.set(self.releases.get() + 1);
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    pub(crate) fn assignment() -> Assignment {
        Assignment {
            id: Uuid::from_u128(1),
            employee_id: Uuid::from_u128(10),
            project_id: Uuid::from_u128(100),
            project_name: "Atlas".into(),
            project_color: ProjectColor::default(),
            start: d(2025, 3, 4),
            end: d(2025, 3, 6),
            allocation_kind: AllocationKind::Percentage,
            allocation_value: 50.0,
            daily_hours: 4.0,
            note: None,
            is_tentative: false,
        }
    }

    fn weekly_scale() -> TimelineScale {
        let grid = CalendarGrid::build(d(2025, 3, 3), ZoomMode::Weekly, &GridAnnotations::default());
        TimelineScale::for_grid(&grid)
    }

    fn started(edge: Edge) -> (ResizeController<CountingCapture>, CountingCapture) {
        let capture = CountingCapture::default();
        let mut controller = ResizeController::new(capture.clone());
        let a = assignment();
        let base = weekly_scale().position(a.start, a.end).unwrap();
        assert!(controller.begin(&a, base, edge, PointerPos::new(100.0, 10.0)));
        (controller, capture)
    }

    #[test]
    fn right_edge_commit_moves_end_date() {
        let scale = weekly_scale();
        let (mut controller, capture) = started(Edge::Right);
        assert_eq!(capture.held.get(), 1);
        controller.update(PointerPos::new(185.0, 12.0));

        let preview = controller.preview(&scale).unwrap();
        assert_eq!(preview.geometry.width, 120.0 + 85.0);
        assert_eq!(preview.days_delta, 2);

        let intent = controller.finish(&scale).unwrap();
        assert_eq!(intent.patch(), &AssignmentPatch::end_date(d(2025, 3, 8)));
        assert_eq!(capture.held.get(), 0);
        assert!(!controller.is_resizing());
    }

    #[test]
    fn left_edge_commit_moves_start_date() {
        let scale = weekly_scale();
        let (mut controller, _capture) = started(Edge::Left);
        controller.update(PointerPos::new(60.0, 10.0));
        let preview = controller.preview(&scale).unwrap();
        assert_eq!(preview.geometry.left, 40.0 - 40.0);
        assert_eq!(preview.geometry.width, 160.0);

        let intent = controller.finish(&scale).unwrap();
        assert_eq!(intent.patch(), &AssignmentPatch::start_date(d(2025, 3, 3)));
    }

    #[test]
    fn less_than_half_a_day_never_patches() {
        let scale = weekly_scale();
        for dx in [-19.9, -5.0, 0.0, 12.0, 19.9] {
            let (mut controller, capture) = started(Edge::Right);
            controller.update(PointerPos::new(100.0 + dx, 10.0));
            assert_eq!(controller.finish(&scale), None, "dx = {dx}");
            assert_eq!(capture.held.get(), 0);
        }
    }

    #[test]
    fn exactly_half_a_day_rounds_away_from_zero() {
        let scale = weekly_scale();
        let (mut controller, _capture) = started(Edge::Right);
        controller.update(PointerPos::new(120.0, 10.0));
        let intent = controller.finish(&scale).unwrap();
        assert_eq!(intent.patch(), &AssignmentPatch::end_date(d(2025, 3, 7)));
    }

    #[test]
    fn preview_width_is_clamped() {
        let scale = weekly_scale();
        let (mut controller, _capture) = started(Edge::Left);
        controller.update(PointerPos::new(400.0, 10.0));
        assert_eq!(controller.preview(&scale).unwrap().geometry.width, MIN_PREVIEW_WIDTH);
    }

    #[test]
    fn discarded_resize_suppresses_one_click() {
        let scale = weekly_scale();
        let (mut controller, _capture) = started(Edge::Right);
        controller.update(PointerPos::new(105.0, 10.0));
        assert_eq!(controller.finish(&scale), None);

        let id = assignment().id;
        assert!(!controller.take_suppressed_click(Uuid::from_u128(99)));
        assert!(controller.take_suppressed_click(id));
        assert!(!controller.take_suppressed_click(id));
    }

    #[test]
    fn suppression_expires_at_end_of_frame() {
        let scale = weekly_scale();
        let (mut controller, _capture) = started(Edge::Right);
        controller.finish(&scale);
        controller.end_frame();
        assert!(!controller.take_suppressed_click(assignment().id));
    }

    #[test]
    fn capture_is_released_on_cancel_and_on_drop() {
        let (mut controller, capture) = started(Edge::Left);
        controller.cancel();
        assert_eq!(capture.held.get(), 0);
        assert_eq!(capture.releases.get(), 1);
        controller.cancel();
        assert_eq!(capture.releases.get(), 1);

        let (controller, capture) = started(Edge::Right);
        drop(controller);
        assert_eq!(capture.held.get(), 0);
        assert_eq!(capture.releases.get(), 1);
    }

    #[test]
    fn second_begin_is_refused_while_resizing() {
        let (mut controller, capture) = started(Edge::Left);
        let a = assignment();
        let base = BarGeometry { left: 0.0, width: 40.0 };
        assert!(!controller.begin(&a, base, Edge::Right, PointerPos::new(0.0, 0.0)));
        assert_eq!(capture.held.get(), 1);
    }
}
