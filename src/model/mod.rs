pub mod assignment;
pub mod employee;
pub mod timeline_data;
pub mod view_state;

pub use assignment::{AllocationKind, Assignment, AssignmentId, EmployeeId, ProjectColor, ProjectId};
pub use employee::{team_label, Employee, TEAMS};
pub use timeline_data::{Holiday, TimelineData, UtilizationRecord};
pub use view_state::{TimelineQuery, TimelineViewState, ZoomMode};
