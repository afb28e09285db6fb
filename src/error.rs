//! Error types and Result aliases for psbridge

use std::fmt;
use std::path::PathBuf;

/// Result type alias for psbridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for psbridge
#[derive(Debug)]
pub enum Error {
    // === Host errors ===
    /// No installed application matches the bundle identifier
    HostNotFound {
        bundle_id: String,
    },

    /// The installation query itself failed
    DiscoveryFailed {
        stderr: String,
    },

    /// The host application could not be opened
    LaunchFailed {
        application: String,
        stderr: String,
    },

    /// The automation command could not be started at all
    DispatchSpawnFailed {
        program: String,
        reason: String,
    },

    // === Run errors ===
    /// No editor snapshot is available
    NoActiveEditor,

    /// Capturing the editor state failed
    Snapshot(crate::models::SnapshotError),

    /// Failed to write the script file handed to the host
    ScriptWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to truncate the log file at the start of a run
    LogResetFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read the log file after the host finished
    LogReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to install the helper include
    HelperInstallFailed {
        path: PathBuf,
        reason: String,
    },

    // === Configuration errors ===
    /// Failed to load configuration file
    ConfigLoadFailed {
        path: PathBuf,
        reason: String,
    },

    /// Configuration file not found
    ConfigNotFound,

    /// Configuration validation failed
    ConfigValidationFailed {
        field: String,
        reason: String,
    },

    /// Failed to serialize configuration
    ConfigSerializationFailed {
        format: String,
        reason: String,
    },

    /// Failed to parse configuration
    ConfigParseFailed {
        format: String,
        reason: String,
    },

    /// Unknown session command
    UnknownCommand {
        command: String,
    },

    // === I/O and serialization errors ===
    /// I/O errors
    Io(std::io::Error),

    /// Serialization errors
    Serde(serde_json::Error),

    /// TOML parsing errors
    Toml(toml::de::Error),

    // === Generic fallback (use sparingly) ===
    /// Generic errors (for cases not yet categorized)
    Other(String),
}

impl Error {
    /// Errors that end a run without putting anything on the console
    pub fn is_silent(&self) -> bool {
        matches!(self, Error::HostNotFound { .. })
    }

    /// The console line a failed run shows for this error
    ///
    /// `None` for silent errors.
    pub fn console_message(&self) -> Option<String> {
        if self.is_silent() {
            return None;
        }
        match self {
            Error::DiscoveryFailed { stderr } => Some(format!("Error: {}", stderr)),
            Error::LaunchFailed { stderr, .. } => Some(format!("Error: {}", stderr)),
            Error::ScriptWriteFailed { source, .. } => Some(format!("Error: {}", source)),
            other => Some(format!("Error: {}", other)),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Host errors
            Error::HostNotFound { bundle_id } => {
                write!(f, "No installed application found for '{}'", bundle_id)
            }
            Error::DiscoveryFailed { stderr } => {
                write!(f, "Host discovery failed: {}", stderr)
            }
            Error::LaunchFailed {
                application,
                stderr,
            } => {
                write!(f, "Failed to open '{}': {}", application, stderr)
            }
            Error::DispatchSpawnFailed { program, reason } => {
                write!(f, "Failed to start '{}': {}", program, reason)
            }

            // Run errors
            Error::NoActiveEditor => {
                write!(f, "No active editor")
            }
            Error::Snapshot(err) => {
                write!(f, "Failed to capture editor state: {}", err)
            }
            Error::ScriptWriteFailed { path, source } => {
                write!(f, "Failed to write script '{}': {}", path.display(), source)
            }
            Error::LogResetFailed { path, source } => {
                write!(f, "Failed to clear log file '{}': {}", path.display(), source)
            }
            Error::LogReadFailed { path, source } => {
                write!(f, "Failed to read log file '{}': {}", path.display(), source)
            }
            Error::HelperInstallFailed { path, reason } => {
                write!(f, "Failed to install helper '{}': {}", path.display(), reason)
            }

            // Configuration errors
            Error::ConfigLoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path.display(), reason)
            }
            Error::ConfigNotFound => {
                write!(f, "Configuration file not found")
            }
            Error::ConfigValidationFailed { field, reason } => {
                write!(f, "Configuration validation failed for '{}': {}", field, reason)
            }
            Error::ConfigSerializationFailed { format, reason } => {
                write!(f, "Failed to serialize config as {}: {}", format, reason)
            }
            Error::ConfigParseFailed { format, reason } => {
                write!(f, "Failed to parse {} config: {}", format, reason)
            }
            Error::UnknownCommand { command } => {
                write!(f, "Unknown command: '{}'", command)
            }

            // I/O and serialization errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Serde(err) => write!(f, "Serialization error: {}", err),
            Error::Toml(err) => write!(f, "TOML parsing error: {}", err),

            // Generic fallback
            Error::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ScriptWriteFailed { source, .. }
            | Error::LogResetFailed { source, .. }
            | Error::LogReadFailed { source, .. } => Some(source),
            Error::Snapshot(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Serde(err) => Some(err),
            Error::Toml(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<crate::models::SnapshotError> for Error {
    fn from(err: crate::models::SnapshotError) -> Self {
        Error::Snapshot(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Other(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Other(err.to_string())
    }
}
