//! Terminal rendering for console lines
//!
//! Each severity maps to a styling class; on a terminal the class becomes
//! an ANSI colour.

use std::io::Write;
use tracing::warn;

use super::{ConsoleSink, ConsoleView};
use crate::models::{ConsoleLine, Severity};

const RESET: &str = "\x1b[0m";
/// Erase the display and home the cursor
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Formats console lines for a terminal
#[derive(Debug, Clone, Copy)]
pub struct LineRenderer {
    /// Emit ANSI colour codes
    color: bool,
}

impl LineRenderer {
    /// Create a renderer
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Whether colour codes are emitted
    pub fn color(&self) -> bool {
        self.color
    }

    /// ANSI sequence for a severity (`None` keeps the terminal default)
    pub fn ansi_style(severity: Severity) -> Option<&'static str> {
        match severity {
            Severity::Log => None,
            Severity::Execution => Some("\x1b[36m"),
            Severity::Error => Some("\x1b[31m"),
            Severity::Info => Some("\x1b[34m"),
            Severity::Warning => Some("\x1b[33m"),
        }
    }

    /// Render one line, without a trailing newline
    pub fn render(&self, line: &ConsoleLine) -> String {
        match Self::ansi_style(line.severity) {
            Some(style) if self.color => format!("{}{}{}", style, line.text, RESET),
            _ => line.text.clone(),
        }
    }
}

impl Default for LineRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Console that mirrors its lines to a writer while visible
///
/// Lines appended while hidden are written once the console is shown.
/// Clearing a visible console also wipes the terminal when colour is on;
/// otherwise it only forgets the lines kept for a later show.
pub struct TerminalConsole<W: Write> {
    view: ConsoleView,
    renderer: LineRenderer,
    out: W,
    /// Number of lines of `view` already written
    written: usize,
}

impl<W: Write> TerminalConsole<W> {
    /// Create a hidden console writing to `out`
    pub fn new(out: W, renderer: LineRenderer) -> Self {
        Self {
            view: ConsoleView::new(),
            renderer,
            out,
            written: 0,
        }
    }

    /// Underlying console state
    pub fn view(&self) -> &ConsoleView {
        &self.view
    }

    /// The writer lines go to
    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Show the console and write anything appended while it was hidden
    pub fn show(&mut self) {
        self.view.show();
        self.flush_pending();
    }

    /// Hide the console
    pub fn hide(&mut self) {
        self.view.hide();
    }

    /// Flip visibility, returning the new state
    pub fn toggle(&mut self) -> bool {
        let visible = self.view.toggle();
        if visible {
            self.flush_pending();
        }
        visible
    }

    fn flush_pending(&mut self) {
        if !self.view.is_visible() {
            return;
        }
        for line in &self.view.lines()[self.written..] {
            if let Err(e) = writeln!(self.out, "{}", self.renderer.render(line)) {
                warn!("Failed to write console line: {}", e);
            }
        }
        self.written = self.view.len();
        if let Err(e) = self.out.flush() {
            warn!("Failed to flush console: {}", e);
        }
    }
}

impl<W: Write> ConsoleSink for TerminalConsole<W> {
    fn append(&mut self, message: &str, severity: Severity) {
        self.view.append(message, severity);
        self.flush_pending();
    }

    fn clear(&mut self) {
        self.view.clear();
        self.written = 0;
        if self.renderer.color() && self.view.is_visible() {
            let cleared = write!(self.out, "{}", CLEAR_SCREEN).and_then(|_| self.out.flush());
            if let Err(e) = cleared {
                warn!("Failed to clear console: {}", e);
            }
        }
    }
}
