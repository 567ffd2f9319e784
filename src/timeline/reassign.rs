//! Drag-to-reassign: dropping a bar on another employee's row moves the assignment there.

use tracing::debug;

use super::interaction::{GestureKind, InteractionSession, PointerPos};
use super::patch::{AssignmentPatch, PatchIntent};
use crate::model::{AssignmentId, EmployeeId};

/// Pointer travel before a press turns into a drag.
pub const ACTIVATION_DISTANCE: f32 = 8.0;

/// What is being dragged, and what it is dropped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPayload {
    BarDrag {
        assignment_id: AssignmentId,
        source_employee_id: EmployeeId,
    },
    RowDrop {
        employee_id: EmployeeId,
    },
}

#[derive(Debug, Clone)]
struct DragSession {
    interaction: InteractionSession,
    source_employee_id: EmployeeId,
    active: bool,
}

#[derive(Debug, Default)]
pub struct DragReassignController {
    session: Option<DragSession>,
}

impl DragReassignController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer-down on a bar body. Nothing is dragged until the pointer has travelled far enough.
    pub fn press(&mut self, assignment_id: AssignmentId, source_employee_id: EmployeeId, origin: PointerPos) {
        self.session = Some(DragSession {
            interaction: InteractionSession::new(GestureKind::Drag, assignment_id, origin),
            source_employee_id,
            active: false,
        });
    }

    pub fn update(&mut self, pointer: PointerPos) {
        if let Some(session) = &mut self.session {
            session.interaction.track(pointer);
            if !session.active && session.interaction.delta.length() >= ACTIVATION_DISTANCE {
                session.active = true;
                debug!(assignment = %session.interaction.subject, "drag activated");
            }
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.active)
    }

    pub fn session(&self) -> Option<&InteractionSession> {
        self.session.as_ref().map(|s| &s.interaction)
    }

    pub fn active_payload(&self) -> Option<DragPayload> {
        self.session
            .as_ref()
            .filter(|s| s.active)
            .map(|s| DragPayload::BarDrag {
                assignment_id: s.interaction.subject,
                source_employee_id: s.source_employee_id,
            })
    }

    /// Pointer-up over `target`. Emits a reassignment only for an activated drag released over a
    /// different employee's row.
    pub fn drop_on(&mut self, target: Option<DragPayload>) -> Option<PatchIntent> {
        let session = self.session.take()?;
        if !session.active {
            return None;
        }
        let Some(DragPayload::RowDrop { employee_id }) = target else {
            debug!(assignment = %session.interaction.subject, "drag released outside any row");
            return None;
        };
        if employee_id == session.source_employee_id {
            debug!(assignment = %session.interaction.subject, "drag dropped on its own row");
            return None;
        }
        Some(PatchIntent::Reassign {
            assignment_id: session.interaction.subject,
            from: session.source_employee_id,
            to: employee_id,
            patch: AssignmentPatch::reassign(employee_id),
        })
    }

    pub fn cancel(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    const ASSIGNMENT: AssignmentId = Uuid::from_u128(1);
    const ALICE: EmployeeId = Uuid::from_u128(10);
    const BOB: EmployeeId = Uuid::from_u128(20);

    fn dragged() -> DragReassignController {
        let mut controller = DragReassignController::new();
        controller.press(ASSIGNMENT, ALICE, PointerPos::new(0.0, 0.0));
        controller.update(PointerPos::new(3.0, 45.0));
        controller
    }

    #[test]
    fn drop_on_another_employee_issues_one_patch() {
        let mut controller = dragged();
        assert_eq!(
            controller.active_payload(),
            Some(DragPayload::BarDrag {
                assignment_id: ASSIGNMENT,
                source_employee_id: ALICE
            })
        );
        let intent = controller.drop_on(Some(DragPayload::RowDrop { employee_id: BOB }));
        assert_eq!(
            intent,
            Some(PatchIntent::Reassign {
                assignment_id: ASSIGNMENT,
                from: ALICE,
                to: BOB,
                patch: AssignmentPatch::reassign(BOB),
            })
        );
        // The session is gone; a second release emits nothing
        assert_eq!(controller.drop_on(Some(DragPayload::RowDrop { employee_id: BOB })), None);
    }

    #[test]
    fn drop_on_own_row_is_a_no_op() {
        let mut controller = dragged();
        assert_eq!(controller.drop_on(Some(DragPayload::RowDrop { employee_id: ALICE })), None);
        assert!(!controller.is_pressed());
    }

    #[test]
    fn short_travel_never_activates() {
        let mut controller = DragReassignController::new();
        controller.press(ASSIGNMENT, ALICE, PointerPos::new(0.0, 0.0));
        controller.update(PointerPos::new(4.0, 5.0));
        assert!(!controller.is_active());
        assert_eq!(controller.active_payload(), None);
        assert_eq!(controller.drop_on(Some(DragPayload::RowDrop { employee_id: BOB })), None);
    }

    #[test]
    fn release_outside_rows_or_on_a_bar_is_ignored() {
        let mut controller = dragged();
        assert_eq!(controller.drop_on(None), None);

        let mut controller = dragged();
        let bar = DragPayload::BarDrag {
            assignment_id: Uuid::from_u128(2),
            source_employee_id: BOB,
        };
        assert_eq!(controller.drop_on(Some(bar)), None);
    }
}
