//! Editor Snapshot Model
//!
//! The state of the active document, captured once when a run starts.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Immutable capture of the active editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorSnapshot {
    /// Whether the buffer has unsaved changes
    pub is_modified: bool,

    /// Path of the document on disk
    pub path: PathBuf,

    /// Buffer contents
    pub text: String,
}

impl EditorSnapshot {
    /// Snapshot of a document with unsaved changes
    pub fn modified(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            is_modified: true,
            path: path.into(),
            text: text.into(),
        }
    }

    /// Snapshot of a document whose buffer matches the file on disk
    pub fn saved(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            is_modified: false,
            path: path.into(),
            text: text.into(),
        }
    }

    /// Document path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Errors raised while capturing a snapshot
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Script not found: {0}")]
    NotFound(PathBuf),

    #[error("Script path is not a file: {0}")]
    NotAFile(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
