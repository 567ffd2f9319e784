//! Assignment patches emitted by the gesture controllers.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{AssignmentId, EmployeeId, TimelineData};

/// Partial update of one assignment. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<EmployeeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl AssignmentPatch {
    pub fn reassign(employee_id: EmployeeId) -> Self {
        Self {
            employee_id: Some(employee_id),
            ..Self::default()
        }
    }

    pub fn start_date(date: NaiveDate) -> Self {
        Self {
            start_date: Some(date),
            ..Self::default()
        }
    }

    pub fn end_date(date: NaiveDate) -> Self {
        Self {
            end_date: Some(date),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.employee_id.is_none() && self.start_date.is_none() && self.end_date.is_none()
    }
}

/// Which edge of a bar a resize moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
}

/// A patch together with what the user did to produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchIntent {
    Resize {
        assignment_id: AssignmentId,
        edge: Edge,
        days_delta: i64,
        patch: AssignmentPatch,
    },
    Reassign {
        assignment_id: AssignmentId,
        from: EmployeeId,
        to: EmployeeId,
        patch: AssignmentPatch,
    },
}

impl PatchIntent {
    pub fn assignment_id(&self) -> AssignmentId {
        match self {
            PatchIntent::Resize { assignment_id, .. } | PatchIntent::Reassign { assignment_id, .. } => {
                *assignment_id
            }
        }
    }

    pub fn patch(&self) -> &AssignmentPatch {
        match self {
            PatchIntent::Resize { patch, .. } | PatchIntent::Reassign { patch, .. } => patch,
        }
    }

    /// Status line after the collaborator accepted the patch.
    ///
    /// `data` is the timeline the gesture was made on, used to name the destination employee.
    pub fn describe_success(&self, data: &TimelineData) -> String {
        match self {
            PatchIntent::Resize {
                edge, days_delta, ..
            } => {
                let which = match edge {
                    Edge::Left => "Start",
                    Edge::Right => "End",
                };
                format!("{which} date moved by {days_delta:+} d")
            }
            PatchIntent::Reassign { to, .. } => {
                let name = data
                    .employee(*to)
                    .map(|e| e.name.as_str())
                    .unwrap_or("another employee");
                format!("Assignment moved to {name}")
            }
        }
    }
}

/// Assignments with a patch in flight. At most one patch per assignment at a time.
#[derive(Debug, Default)]
pub struct PatchGuard {
    in_flight: HashSet<AssignmentId>,
}

impl PatchGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `id`. Returns `false` when a patch for it is already in flight.
    pub fn begin(&mut self, id: AssignmentId) -> bool {
        self.in_flight.insert(id)
    }

    pub fn finish(&mut self, id: AssignmentId) {
        self.in_flight.remove(&id);
    }

    pub fn is_pending(&self, id: AssignmentId) -> bool {
        self.in_flight.contains(&id)
    }
}
