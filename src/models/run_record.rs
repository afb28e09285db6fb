//! Run Record Model
//!
//! Describes one invocation of the execution pipeline: when it started,
//! how it ended, and how long the host took.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

/// Outcome of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RunStatus {
    /// Run is being prepared
    #[default]
    Pending,
    /// Script was handed to the host and the pipeline is waiting
    Running,
    /// Host finished and reported no error
    Completed,
    /// A stage failed or the host reported an error
    Failed,
}

/// Record of a single run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// Unique identifier for the run
    pub id: String,

    /// Script file handed to the host
    pub script_path: PathBuf,

    /// When the run started (in local time)
    pub started_at: DateTime<Local>,

    /// Current status
    pub status: RunStatus,

    /// Wall-clock time until the host returned (None until it does)
    pub execution_time: Option<Duration>,

    /// Exit code of the automation command (None if it never ran)
    pub exit_code: Option<i32>,
}

impl RunRecord {
    /// Create a new pending run record
    pub fn new(script_path: PathBuf) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            script_path,
            started_at: Local::now(),
            status: RunStatus::Pending,
            execution_time: None,
            exit_code: None,
        }
    }

    /// Mark the script as dispatched
    pub fn mark_running(&mut self) {
        self.status = RunStatus::Running;
    }

    /// Mark the run as completed successfully
    pub fn mark_completed(&mut self, execution_time: Duration, exit_code: Option<i32>) {
        self.status = RunStatus::Completed;
        self.execution_time = Some(execution_time);
        self.exit_code = exit_code;
    }

    /// Mark the run as failed
    pub fn mark_failed(&mut self, execution_time: Option<Duration>, exit_code: Option<i32>) {
        self.status = RunStatus::Failed;
        self.execution_time = execution_time;
        self.exit_code = exit_code;
    }

    /// Check if the run completed successfully
    pub fn is_successful(&self) -> bool {
        matches!(self.status, RunStatus::Completed)
    }

    /// Check if the run failed
    pub fn is_failed(&self) -> bool {
        matches!(self.status, RunStatus::Failed)
    }
}
