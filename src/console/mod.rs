//! Output console
//!
//! The console is an ordered, append-only list of styled lines. The
//! pipeline only talks to it through [`ConsoleSink`]; how lines reach the
//! user is up to the implementation ([`ConsoleView`] keeps them in memory,
//! [`TerminalConsole`] also writes them to a terminal).

pub mod render;

pub use render::{LineRenderer, TerminalConsole};

use crate::models::{ConsoleLine, Severity};

/// Destination for console messages
///
/// Appending and clearing never fail.
pub trait ConsoleSink {
    /// Add one line and bring it into view
    fn append(&mut self, message: &str, severity: Severity);

    /// Remove every line
    fn clear(&mut self);

    /// Add one untagged line (styled as `log`)
    fn append_untagged(&mut self, message: &str) {
        self.append(message, Severity::default());
    }
}

/// In-memory console state
#[derive(Debug, Clone, Default)]
pub struct ConsoleView {
    /// Displayed lines, oldest first
    lines: Vec<ConsoleLine>,
    /// Whether the console panel is shown
    visible: bool,
    /// Index of the line currently scrolled into view
    scroll_position: usize,
}

impl ConsoleView {
    /// Create an empty, hidden console
    pub fn new() -> Self {
        Self::default()
    }

    /// Displayed lines, oldest first
    pub fn lines(&self) -> &[ConsoleLine] {
        &self.lines
    }

    /// Number of displayed lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if there is nothing to display
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Index of the line currently scrolled into view
    pub fn scroll_position(&self) -> usize {
        self.scroll_position
    }

    /// Check if the panel is shown
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show the panel
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hide the panel
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Flip visibility, returning the new state
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// Texts of all lines, oldest first
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_position = self.lines.len().saturating_sub(1);
    }
}

impl ConsoleSink for ConsoleView {
    fn append(&mut self, message: &str, severity: Severity) {
        self.lines.push(ConsoleLine::new(message, severity));
        self.scroll_to_bottom();
    }

    fn clear(&mut self) {
        self.lines.clear();
        self.scroll_position = 0;
    }
}
