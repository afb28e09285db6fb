//! Host application driver
//!
//! The pipeline needs three things from the operating system: find the
//! installed host, open it, and ask it to run a script file. These are
//! expressed by [`HostDriver`] so tests can swap the real commands out.

mod osascript;

pub use osascript::{dispatch_applescript, OsascriptHost};

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

use crate::error::Result;

/// What the automation command returned
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutput {
    /// Whether the command exited successfully
    pub success: bool,
    /// Exit code (None when killed by a signal)
    pub exit_code: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl DispatchOutput {
    /// Successful dispatch with the given standard output
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed dispatch with the given standard error
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code: Some(exit_code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Operating-system operations on the host application
#[async_trait]
pub trait HostDriver: Send + Sync {
    /// Find the installed application bundle for `bundle_id`
    ///
    /// `Ok(None)` means the query ran but nothing is installed.
    async fn discover(&self, bundle_id: &str) -> Result<Option<String>>;

    /// Open (or bring forward) the application at `application`
    async fn launch(&self, application: &str) -> Result<()>;

    /// Ask the host to run the script at `script_path` and wait for it
    ///
    /// `timeout` is applied by the host-side automation block, not by the
    /// caller.
    async fn dispatch(
        &self,
        bundle_id: &str,
        script_path: &Path,
        timeout: Duration,
    ) -> Result<DispatchOutput>;
}
