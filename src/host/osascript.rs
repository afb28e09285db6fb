//! macOS host driver built on `mdfind`, `open` and `osascript`
//!
//! Every command is spawned with an argument vector; nothing goes through
//! a shell.

use async_trait::async_trait;
use std::path::Path;
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error};

use super::{DispatchOutput, HostDriver};
use crate::error::{Error, Result};

/// Drives the host through the standard macOS command-line tools
#[derive(Debug, Clone)]
pub struct OsascriptHost {
    mdfind: String,
    open: String,
    osascript: String,
}

impl OsascriptHost {
    /// Driver using the system tools from `PATH`
    pub fn new() -> Self {
        Self::with_programs("mdfind", "open", "osascript")
    }

    /// Driver using custom programs for discovery, launch and dispatch
    pub fn with_programs(
        mdfind: impl Into<String>,
        open: impl Into<String>,
        osascript: impl Into<String>,
    ) -> Self {
        Self {
            mdfind: mdfind.into(),
            open: open.into(),
            osascript: osascript.into(),
        }
    }
}

impl Default for OsascriptHost {
    fn default() -> Self {
        Self::new()
    }
}

/// Spotlight query matching an application bundle identifier
pub fn bundle_query(bundle_id: &str) -> String {
    format!("kMDItemCFBundleIdentifier == '{}'", bundle_id)
}

/// AppleScript that runs `script_path` inside the host's script engine
pub fn dispatch_applescript(bundle_id: &str, script_path: &Path, timeout: Duration) -> String {
    format!(
        "with timeout of {} seconds\ntell application id \"{}\" to do javascript (\"#include {}\")\nend timeout",
        timeout.as_secs(),
        escape_applescript(bundle_id),
        escape_applescript(&script_path.to_string_lossy()),
    )
}

fn escape_applescript(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[async_trait]
impl HostDriver for OsascriptHost {
    async fn discover(&self, bundle_id: &str) -> Result<Option<String>> {
        debug!(bundle_id, "Looking up installed host");

        let output = Command::new(&self.mdfind)
            .arg(bundle_query(bundle_id))
            .output()
            .await
            .map_err(|e| Error::DiscoveryFailed {
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = stderr_text(&output);
            error!(stderr = %stderr, "Host discovery command failed");
            return Err(Error::DiscoveryFailed { stderr });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let first = stdout.split('\n').next().unwrap_or_default();
        if first.is_empty() {
            Ok(None)
        } else {
            Ok(Some(first.to_string()))
        }
    }

    async fn launch(&self, application: &str) -> Result<()> {
        debug!(application, "Opening host");

        let output = Command::new(&self.open)
            .arg("-a")
            .arg(application)
            .output()
            .await
            .map_err(|e| Error::LaunchFailed {
                application: application.to_string(),
                stderr: e.to_string(),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = stderr_text(&output);
            error!(application, stderr = %stderr, "Failed to open host");
            Err(Error::LaunchFailed {
                application: application.to_string(),
                stderr,
            })
        }
    }

    async fn dispatch(
        &self,
        bundle_id: &str,
        script_path: &Path,
        timeout: Duration,
    ) -> Result<DispatchOutput> {
        let applescript = dispatch_applescript(bundle_id, script_path, timeout);
        debug!(script = %script_path.display(), "Dispatching script to host");

        let output = Command::new(&self.osascript)
            .arg("-e")
            .arg(&applescript)
            .output()
            .await
            .map_err(|e| Error::DispatchSpawnFailed {
                program: self.osascript.clone(),
                reason: e.to_string(),
            })?;

        Ok(DispatchOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: stderr_text(&output),
        })
    }
}
