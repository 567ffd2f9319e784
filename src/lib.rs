//! Timeline layout and direct-manipulation engine for a workforce-scheduling planner.
//!
//! The engine turns per-employee assignment intervals into a pixel-accurate calendar grid,
//! stacks overlapping bars, derives utilization, and converts resize/drag gestures into
//! assignment patches for a mutation collaborator to execute.

pub mod calendar;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod timeline;

pub use error::{ConfigError, SourceError};
