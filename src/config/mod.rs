//! Configuration management for psbridge
//!
//! Which host application to drive, where the hand-off files live, and
//! how the console behaves. Files are TOML (JSON is also accepted); see
//! [`loader::ConfigLoader`] for where they are looked up.

pub mod loader;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Bundle identifier of Adobe Photoshop
pub const DEFAULT_BUNDLE_ID: &str = "com.adobe.Photoshop";

/// 30 days; long enough for interactive scripts
pub const DEFAULT_DISPATCH_TIMEOUT_SECS: u64 = 2_592_000;

/// Separator the helper writes in front of every log entry
pub const DEFAULT_LOG_DELIMITER: &str = "##";

/// Main configuration structure for psbridge
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Host application configuration
    pub host: HostConfig,

    /// Hand-off file locations
    pub paths: PathsConfig,

    /// Console configuration
    pub console: ConsoleConfig,
}

impl Config {
    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        loader::ConfigLoader::new().load_file(path)
    }

    /// Serialize as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::ConfigSerializationFailed {
            format: "TOML".to_string(),
            reason: e.to_string(),
        })
    }
}

/// Host application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Bundle identifier used to find and address the host
    pub bundle_id: String,

    /// Timeout wrapped around the script dispatch, in seconds
    pub dispatch_timeout_secs: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            bundle_id: DEFAULT_BUNDLE_ID.to_string(),
            dispatch_timeout_secs: DEFAULT_DISPATCH_TIMEOUT_SECS,
        }
    }
}

/// Locations of the helper include and the hand-off files
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Base directory (defaults to the user's local data directory)
    pub work_dir: Option<PathBuf>,

    /// Helper include (defaults to `<work_dir>/jsx/Helpers.jsx`)
    pub helper_path: Option<PathBuf>,

    /// Script file (defaults to `<work_dir>/tmp/script.jsx`)
    pub script_path: Option<PathBuf>,

    /// Log file (defaults to `<work_dir>/tmp/log.txt`)
    pub log_path: Option<PathBuf>,
}

impl PathsConfig {
    /// Resolved base directory
    pub fn work_dir(&self) -> PathBuf {
        self.work_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("psbridge")
        })
    }

    /// Resolved helper include path
    pub fn helper_path(&self) -> PathBuf {
        self.helper_path
            .clone()
            .unwrap_or_else(|| self.work_dir().join("jsx").join("Helpers.jsx"))
    }

    /// Resolved script file path
    pub fn script_path(&self) -> PathBuf {
        self.script_path
            .clone()
            .unwrap_or_else(|| self.work_dir().join("tmp").join("script.jsx"))
    }

    /// Resolved log file path
    pub fn log_path(&self) -> PathBuf {
        self.log_path
            .clone()
            .unwrap_or_else(|| self.work_dir().join("tmp").join("log.txt"))
    }

    /// Paths rooted in a single directory, as used by tests and `--work-dir`
    pub fn rooted_at(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: Some(work_dir.into()),
            ..Self::default()
        }
    }
}

/// Console configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Log entry separator
    pub delimiter: String,

    /// Colour lines by severity
    pub color: bool,

    /// Make the console visible when a run starts
    pub show_on_run: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_LOG_DELIMITER.to_string(),
            color: true,
            show_on_run: true,
        }
    }
}
