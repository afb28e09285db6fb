//! Log file reading
//!
//! The helper include appends `<delimiter><message>` to the log file for
//! every `log()` call made by the script. The file is emptied when a run
//! starts and read once after the host returns.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::console::ConsoleSink;
use crate::error::{Error, Result};

/// Reads the host's log file
#[derive(Debug, Clone)]
pub struct LogReader {
    path: PathBuf,
    delimiter: String,
}

impl LogReader {
    /// Create a reader for `path` splitting on `delimiter`
    pub fn new(path: impl Into<PathBuf>, delimiter: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            delimiter: delimiter.into(),
        }
    }

    /// Log file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Truncate the log file, creating it if needed
    pub fn reset(&self) -> Result<()> {
        std::fs::write(&self.path, "").map_err(|source| Error::LogResetFailed {
            path: self.path.clone(),
            source,
        })
    }

    /// Read every entry currently in the log file
    ///
    /// Invalid UTF-8 is replaced with U+FFFD rather than failing the read.
    pub fn read_entries(&self) -> Result<Vec<String>> {
        let bytes = std::fs::read(&self.path).map_err(|source| Error::LogReadFailed {
            path: self.path.clone(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes);
        let entries = parse_entries(&content, &self.delimiter);
        debug!(path = %self.path.display(), entries = entries.len(), "Log file read");
        Ok(entries)
    }

    /// Send every entry to the console as an untagged line
    ///
    /// Returns the number of entries forwarded.
    pub fn flush_to(&self, sink: &mut dyn ConsoleSink) -> Result<usize> {
        let entries = self.read_entries()?;
        for entry in &entries {
            sink.append_untagged(entry);
        }
        Ok(entries.len())
    }
}

/// Split log content into entries
///
/// Whatever precedes the first delimiter is not log output and is dropped;
/// every later segment is kept verbatim, empty ones included.
pub fn parse_entries(content: &str, delimiter: &str) -> Vec<String> {
    content
        .split(delimiter)
        .skip(1)
        .map(str::to_string)
        .collect()
}
