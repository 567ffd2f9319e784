//! Gesture sessions and their coordination.

use tracing::{debug, warn};

use super::patch::{Edge, PatchGuard, PatchIntent};
use super::position::{BarGeometry, TimelineScale};
use super::reassign::{DragPayload, DragReassignController};
use super::resize::{ResizeController, ResizePreview};
use crate::model::{Assignment, AssignmentId, EmployeeId};

/// Exclusive ownership of pointer input for the duration of a gesture.
///
/// While captured, moves and releases anywhere on screen go to the capturing gesture.
pub trait PointerCapture {
    fn acquire(&mut self);
    fn release(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPos {
    pub x: f32,
    pub y: f32,
}

impl PointerPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl std::ops::Sub for PointerPos {
    type Output = PointerPos;

    fn sub(self, rhs: PointerPos) -> PointerPos {
        PointerPos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    ResizeLeft,
    ResizeRight,
    Drag,
}

/// One live pointer gesture on one bar. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionSession {
    pub kind: GestureKind,
    pub subject: AssignmentId,
    pub origin: PointerPos,
    pub delta: PointerPos,
}

impl InteractionSession {
    pub fn new(kind: GestureKind, subject: AssignmentId, origin: PointerPos) -> Self {
        Self {
            kind,
            subject,
            origin,
            delta: PointerPos::default(),
        }
    }

    pub fn track(&mut self, pointer: PointerPos) {
        self.delta = pointer - self.origin;
    }
}

/// Routes pointer events to the resize and drag controllers and keeps the gesture rules:
/// one gesture at a time, resize and drag never on the same bar together, and no new gesture on
/// a bar whose previous patch is still in flight.
pub struct Interactions<C: PointerCapture> {
    resize: ResizeController<C>,
    drag: DragReassignController,
    guard: PatchGuard,
}

impl<C: PointerCapture> Interactions<C> {
    pub fn new(capture: C) -> Self {
        Self {
            resize: ResizeController::new(capture),
            drag: DragReassignController::new(),
            guard: PatchGuard::new(),
        }
    }

    pub fn capture(&self) -> &C {
        self.resize.capture()
    }

    pub fn is_busy(&self) -> bool {
        self.resize.is_resizing() || self.drag.is_pressed()
    }

    pub fn is_pending(&self, id: AssignmentId) -> bool {
        self.guard.is_pending(id)
    }

    pub fn begin_resize(
        &mut self,
        assignment: &Assignment,
        base: BarGeometry,
        edge: Edge,
        origin: PointerPos,
    ) -> bool {
        if self.is_busy() || self.guard.is_pending(assignment.id) {
            debug!(assignment = %assignment.id, "resize refused");
            return false;
        }
        self.resize.begin(assignment, base, edge, origin)
    }

    pub fn press_bar(
        &mut self,
        assignment_id: AssignmentId,
        employee_id: EmployeeId,
        origin: PointerPos,
    ) -> bool {
        if self.is_busy() || self.guard.is_pending(assignment_id) {
            return false;
        }
        self.drag.press(assignment_id, employee_id, origin);
        true
    }

    pub fn pointer_moved(&mut self, pointer: PointerPos) {
        if self.resize.is_resizing() {
            self.resize.update(pointer);
        } else {
            self.drag.update(pointer);
        }
    }

    pub fn resize_preview(&self, scale: &TimelineScale) -> Option<ResizePreview> {
        self.resize.preview(scale)
    }

    /// Payload being dragged, once the activation distance has been crossed.
    pub fn drag_payload(&self) -> Option<DragPayload> {
        self.drag.active_payload()
    }

    /// Live offset of the dragged bar.
    pub fn drag_offset(&self) -> Option<PointerPos> {
        self.drag.session().filter(|_| self.drag.is_active()).map(|s| s.delta)
    }

    pub fn end_resize(&mut self, scale: &TimelineScale) -> Option<PatchIntent> {
        let intent = self.resize.finish(scale)?;
        self.claim(intent)
    }

    /// Release over the employee row `target`, or over nothing.
    pub fn end_drag(&mut self, target: Option<EmployeeId>) -> Option<PatchIntent> {
        let intent = self.drag.drop_on(target.map(|employee_id| DragPayload::RowDrop { employee_id }))?;
        self.claim(intent)
    }

    pub fn cancel(&mut self) {
        self.resize.cancel();
        self.drag.cancel();
    }

    /// The collaborator finished with the patch for `id`, successfully or not.
    pub fn settle(&mut self, id: AssignmentId) {
        self.guard.finish(id);
    }

    pub fn take_suppressed_click(&mut self, id: AssignmentId) -> bool {
        self.resize.take_suppressed_click(id)
    }

    pub fn end_frame(&mut self) {
        self.resize.end_frame();
    }

    fn claim(&mut self, intent: PatchIntent) -> Option<PatchIntent> {
        if self.guard.begin(intent.assignment_id()) {
            Some(intent)
        } else {
            warn!(assignment = %intent.assignment_id(), "patch already in flight, dropping gesture");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::model::{Assignment, ZoomMode};
    use crate::timeline::grid::{CalendarGrid, GridAnnotations};
    use crate::timeline::resize::tests::{assignment, CountingCapture};

    fn scale() -> TimelineScale {
        let monday = chrono::NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        TimelineScale::for_grid(&CalendarGrid::build(monday, ZoomMode::Weekly, &GridAnnotations::default()))
    }

    fn base(a: &Assignment) -> BarGeometry {
        scale().position(a.start, a.end).unwrap()
    }

    #[test]
    fn session_tracks_delta_from_origin() {
        let mut session = InteractionSession::new(GestureKind::Drag, Uuid::nil(), PointerPos::new(10.0, 5.0));
        session.track(PointerPos::new(16.0, 13.0));
        assert_eq!(session.delta, PointerPos::new(6.0, 8.0));
        assert_eq!(session.delta.length(), 10.0);
    }

    #[test]
    fn resize_excludes_drag_on_the_same_bar() {
        let a = assignment();
        let mut interactions = Interactions::new(CountingCapture::default());
        assert!(interactions.begin_resize(&a, base(&a), Edge::Right, PointerPos::new(100.0, 0.0)));
        assert!(!interactions.press_bar(a.id, a.employee_id, PointerPos::new(100.0, 0.0)));

        // Moves go to the resize, never activating a drag
        interactions.pointer_moved(PointerPos::new(180.0, 40.0));
        assert_eq!(interactions.drag_payload(), None);
        assert!(interactions.end_resize(&scale()).is_some());
    }

    #[test]
    fn drag_excludes_resize() {
        let a = assignment();
        let mut interactions = Interactions::new(CountingCapture::default());
        assert!(interactions.press_bar(a.id, a.employee_id, PointerPos::new(50.0, 0.0)));
        assert!(!interactions.begin_resize(&a, base(&a), Edge::Left, PointerPos::new(40.0, 0.0)));
        assert_eq!(interactions.capture().held.get(), 0);
    }

    #[test]
    fn no_new_gesture_while_a_patch_is_in_flight() {
        let a = assignment();
        let scale = scale();
        let mut interactions = Interactions::new(CountingCapture::default());
        interactions.begin_resize(&a, base(&a), Edge::Right, PointerPos::new(100.0, 0.0));
        interactions.pointer_moved(PointerPos::new(140.0, 0.0));
        let intent = interactions.end_resize(&scale).unwrap();
        assert!(interactions.is_pending(intent.assignment_id()));

        assert!(!interactions.begin_resize(&a, base(&a), Edge::Right, PointerPos::new(100.0, 0.0)));
        assert!(!interactions.press_bar(a.id, a.employee_id, PointerPos::new(100.0, 0.0)));

        interactions.settle(a.id);
        assert!(interactions.press_bar(a.id, a.employee_id, PointerPos::new(100.0, 0.0)));
    }

    #[test]
    fn drag_to_another_row_claims_the_assignment() {
        let a = assignment();
        let target = Uuid::from_u128(20);
        let mut interactions = Interactions::new(CountingCapture::default());
        interactions.press_bar(a.id, a.employee_id, PointerPos::new(50.0, 10.0));
        interactions.pointer_moved(PointerPos::new(52.0, 70.0));
        assert!(interactions.drag_offset().is_some());

        let intent = interactions.end_drag(Some(target)).unwrap();
        assert_eq!(intent.patch().employee_id, Some(target));
        assert!(interactions.is_pending(a.id));
        assert!(!interactions.is_busy());
    }

    #[test]
    fn cancel_releases_everything() {
        let a = assignment();
        let mut interactions = Interactions::new(CountingCapture::default());
        interactions.begin_resize(&a, base(&a), Edge::Left, PointerPos::new(40.0, 0.0));
        interactions.cancel();
        assert!(!interactions.is_busy());
        assert_eq!(interactions.capture().held.get(), 0);
    }
}
