//! Editor state providers
//!
//! A run starts by capturing the active document. Editors integrate by
//! implementing [`EditorProvider`]; the command-line front end uses
//! [`FileEditor`], which treats a file on disk as the active document and
//! optionally takes an unsaved buffer from the caller.

use std::path::{Path, PathBuf};

use crate::models::{EditorSnapshot, SnapshotError};

/// Source of the active document
pub trait EditorProvider {
    /// Capture the active document, `Ok(None)` when no editor is active
    fn snapshot(&self) -> Result<Option<EditorSnapshot>, SnapshotError>;
}

/// A document backed by a file, with an optional unsaved buffer
#[derive(Debug, Clone)]
pub struct FileEditor {
    path: PathBuf,
    buffer: Option<String>,
}

impl FileEditor {
    /// Document whose contents are the file on disk
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            buffer: None,
        }
    }

    /// Document with unsaved changes held in `buffer`
    pub fn with_buffer(path: impl Into<PathBuf>, buffer: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            buffer: Some(buffer.into()),
        }
    }

    /// Document path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the unsaved buffer
    pub fn set_buffer(&mut self, buffer: Option<String>) {
        self.buffer = buffer;
    }
}

impl EditorProvider for FileEditor {
    fn snapshot(&self) -> Result<Option<EditorSnapshot>, SnapshotError> {
        // unsaved buffers may not exist on disk yet
        if let Some(buffer) = &self.buffer {
            return Ok(Some(EditorSnapshot::modified(&self.path, buffer.clone())));
        }

        if !self.path.exists() {
            return Err(SnapshotError::NotFound(self.path.clone()));
        }
        if !self.path.is_file() {
            return Err(SnapshotError::NotAFile(self.path.clone()));
        }

        let path = self.path.canonicalize()?;
        let text = std::fs::read_to_string(&path)?;
        Ok(Some(EditorSnapshot::saved(path, text)))
    }
}

/// Provider with no active editor
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEditor;

impl EditorProvider for NoEditor {
    fn snapshot(&self) -> Result<Option<EditorSnapshot>, SnapshotError> {
        Ok(None)
    }
}

impl EditorProvider for EditorSnapshot {
    fn snapshot(&self) -> Result<Option<EditorSnapshot>, SnapshotError> {
        Ok(Some(self.clone()))
    }
}
