//! Script assembly and the hand-off script file
//!
//! Every script handed to the host starts by including the helper file,
//! which gives it a `log()` function writing to the log file. After that
//! comes either the unsaved buffer text or an include of the saved file.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::EditorSnapshot;

const HELPER_TEMPLATE: &str = include_str!("../assets/Helpers.jsx");

/// Builds the script text handed to the host
#[derive(Debug, Clone)]
pub struct ScriptAssembler {
    helper_path: PathBuf,
}

impl ScriptAssembler {
    /// Create an assembler that injects `helper_path`
    pub fn new(helper_path: impl Into<PathBuf>) -> Self {
        Self {
            helper_path: helper_path.into(),
        }
    }

    /// Helper include path
    pub fn helper_path(&self) -> &Path {
        &self.helper_path
    }

    /// Assemble the script for a snapshot
    ///
    /// Unsaved buffers are sent inline; saved documents are included from
    /// disk so the host resolves their own relative includes.
    pub fn assemble(&self, snapshot: &EditorSnapshot) -> String {
        let header = include_directive(&self.helper_path);
        if snapshot.is_modified {
            format!("{}\n\n{}", header, snapshot.text)
        } else {
            format!("{}\n\n{}", header, include_directive(&snapshot.path))
        }
    }
}

fn include_directive(path: &Path) -> String {
    format!("#include {}", path.display())
}

/// Replace the script file with `script`
pub async fn write_script(path: &Path, script: &str) -> Result<()> {
    tokio::fs::write(path, script)
        .await
        .map_err(|source| Error::ScriptWriteFailed {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), bytes = script.len(), "Script file written");
    Ok(())
}

/// Render the helper include for a given log file and delimiter
pub fn render_helper(log_path: &Path, delimiter: &str) -> String {
    HELPER_TEMPLATE
        .replace("{{LOG_PATH}}", &escape_js_string(&log_path.to_string_lossy()))
        .replace("{{DELIMITER}}", &escape_js_string(delimiter))
}

/// Write the helper include unless it is already up to date
///
/// Returns whether the file was (re)written.
pub fn install_helper(helper_path: &Path, log_path: &Path, delimiter: &str) -> Result<bool> {
    let rendered = render_helper(log_path, delimiter);

    if let Ok(existing) = std::fs::read_to_string(helper_path) {
        if existing == rendered {
            return Ok(false);
        }
    }

    let install_err = |e: std::io::Error| Error::HelperInstallFailed {
        path: helper_path.to_path_buf(),
        reason: e.to_string(),
    };
    if let Some(parent) = helper_path.parent() {
        std::fs::create_dir_all(parent).map_err(install_err)?;
    }
    std::fs::write(helper_path, rendered).map_err(install_err)?;

    debug!(path = %helper_path.display(), "Helper include installed");
    Ok(true)
}

fn escape_js_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            c => escaped.push(c),
        }
    }
    escaped
}
