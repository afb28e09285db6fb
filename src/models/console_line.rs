//! Console Line Model
//!
//! A single message shown in the output console, tagged with a severity
//! that decides how it is styled.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Styling tag for a console line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Plain script output (also the fallback for untagged messages)
    #[default]
    Log,
    /// Run timing summary
    Execution,
    /// Failure reported by a stage or by the host
    Error,
    /// Informational notice
    Info,
    /// Recoverable problem
    Warning,
}

impl Severity {
    /// All severities, in declaration order
    pub const ALL: [Severity; 5] = [
        Severity::Log,
        Severity::Execution,
        Severity::Error,
        Severity::Info,
        Severity::Warning,
    ];

    /// Resolve an optional tag; anything unrecognised falls back to `Log`
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some("execution") => Severity::Execution,
            Some("error") => Severity::Error,
            Some("info") => Severity::Info,
            Some("warning") => Severity::Warning,
            _ => Severity::Log,
        }
    }

    /// Styling class attached to rendered lines
    pub fn class_name(&self) -> &'static str {
        match self {
            Severity::Log => "log",
            Severity::Execution => "execution",
            Severity::Error => "error",
            Severity::Info => "info",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// One displayed console line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleLine {
    /// Message text, verbatim
    pub text: String,

    /// Styling tag
    pub severity: Severity,

    /// When the line was appended
    pub timestamp: DateTime<Local>,
}

impl ConsoleLine {
    /// Create a new console line stamped with the current time
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
            timestamp: Local::now(),
        }
    }

    /// Styling class for this line
    pub fn class_name(&self) -> &'static str {
        self.severity.class_name()
    }
}
