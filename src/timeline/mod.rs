//! Layout and direct-manipulation engine.

pub mod fetch;
pub mod grid;
pub mod interaction;
pub mod patch;
pub mod position;
pub mod reassign;
pub mod render;
pub mod resize;
pub mod stacking;
pub mod utilization;

pub use fetch::{FetchTicket, TimelineCache};
pub use grid::{Bucket, CalendarGrid, DayBucket, GridAnnotations, MonthBucket, WeekBucket};
pub use interaction::{GestureKind, InteractionSession, Interactions, PointerCapture, PointerPos};
pub use patch::{AssignmentPatch, Edge, PatchGuard, PatchIntent};
pub use position::{BarGeometry, TimelineScale, DAY_WIDTH, MONTH_WIDTH};
pub use reassign::{DragPayload, DragReassignController, ACTIVATION_DISTANCE};
pub use render::{EmployeeLane, RenderModel, RenderedBar};
pub use resize::{ResizeController, ResizePreview, MIN_PREVIEW_WIDTH};
pub use stacking::{stack, OverlapStacker, Stacking};
pub use utilization::{BucketUtilization, Severity};
