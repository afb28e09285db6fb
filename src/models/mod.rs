//! Core data models for psbridge
//!
//! This module contains the small set of structures a run works with:
//! console lines and their severity, the editor snapshot captured at the
//! start of a run, and the record of a finished run.

pub mod console_line;
pub mod run_record;
pub mod snapshot;

// Re-exports for convenience
pub use console_line::{ConsoleLine, Severity};
pub use run_record::{RunRecord, RunStatus};
pub use snapshot::{EditorSnapshot, SnapshotError};
