//! Data collaborators: where timeline data comes from and where patches go.

pub mod csv_export;
pub mod dataset;
pub mod demo;
pub mod store;

pub use csv_export::export_utilization_csv;
pub use dataset::{AssignmentRecord, Dataset, EmployeeRecord, ProjectRecord};
pub use store::JsonFileStore;

use crate::error::SourceError;
use crate::model::{AssignmentId, TimelineData, TimelineQuery};
use crate::timeline::AssignmentPatch;

/// Supplies the employees, assignments and calendar facts for one window.
pub trait TimelineSource {
    fn fetch_timeline(&self, query: &TimelineQuery) -> Result<TimelineData, SourceError>;
}

/// Executes assignment patches emitted by the gesture controllers.
pub trait AssignmentMutator {
    fn patch_assignment(&mut self, id: AssignmentId, patch: &AssignmentPatch) -> Result<(), SourceError>;
}
