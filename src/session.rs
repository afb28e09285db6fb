//! Interactive session
//!
//! A session owns the console and exposes the three user-facing commands:
//! run the current script, toggle the console, clear the console. It also
//! provides the state hook an editor calls when saving its workspace.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use crate::console::ConsoleSink;
use crate::editor::EditorProvider;
use crate::error::{Error, Result};
use crate::host::HostDriver;
use crate::models::RunRecord;
use crate::pipeline::{BridgeContext, ExecutionPipeline};

/// User-facing commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Run the active document in the host
    Run,
    /// Show or hide the console
    ToggleConsole,
    /// Remove every console line
    ClearConsole,
}

impl SessionCommand {
    /// Namespaced command name
    pub fn name(&self) -> &'static str {
        match self {
            SessionCommand::Run => "psbridge:run",
            SessionCommand::ToggleConsole => "psbridge:toggle-console",
            SessionCommand::ClearConsole => "psbridge:clear-console",
        }
    }
}

impl FromStr for SessionCommand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let name = trimmed.strip_prefix("psbridge:").unwrap_or(trimmed);
        match name {
            "run" => Ok(SessionCommand::Run),
            "toggle-console" | "toggle" => Ok(SessionCommand::ToggleConsole),
            "clear-console" | "clear" => Ok(SessionCommand::ClearConsole),
            _ => Err(Error::UnknownCommand {
                command: trimmed.to_string(),
            }),
        }
    }
}

/// Serialisable session state for workspace restore
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Console view state (nothing is restored)
    pub console: ConsoleState,
}

/// Console view state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleState {}

/// Console operations a session needs beyond appending lines
pub trait ConsolePanel: ConsoleSink {
    /// Show the panel
    fn show(&mut self);
    /// Hide the panel
    fn hide(&mut self);
    /// Flip visibility, returning the new state
    fn toggle(&mut self) -> bool;
}

impl ConsolePanel for crate::console::ConsoleView {
    fn show(&mut self) {
        crate::console::ConsoleView::show(self)
    }

    fn hide(&mut self) {
        crate::console::ConsoleView::hide(self)
    }

    fn toggle(&mut self) -> bool {
        crate::console::ConsoleView::toggle(self)
    }
}

impl<W: std::io::Write> ConsolePanel for crate::console::TerminalConsole<W> {
    fn show(&mut self) {
        crate::console::TerminalConsole::show(self)
    }

    fn hide(&mut self) {
        crate::console::TerminalConsole::hide(self)
    }

    fn toggle(&mut self) -> bool {
        crate::console::TerminalConsole::toggle(self)
    }
}

/// A running bridge: context, host driver and console
pub struct BridgeSession<C: ConsolePanel> {
    context: BridgeContext,
    host: Box<dyn HostDriver>,
    console: C,
    show_on_run: bool,
}

impl<C: ConsolePanel> BridgeSession<C> {
    /// Create a session
    pub fn new(context: BridgeContext, host: Box<dyn HostDriver>, console: C) -> Self {
        Self {
            context,
            host,
            console,
            show_on_run: true,
        }
    }

    /// Whether `run` makes the console visible first
    pub fn set_show_on_run(&mut self, show_on_run: bool) {
        self.show_on_run = show_on_run;
    }

    /// Resolved context
    pub fn context(&self) -> &BridgeContext {
        &self.context
    }

    /// Console
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Run the active document
    pub async fn run(&mut self, editor: &dyn EditorProvider) -> Result<RunRecord> {
        if self.show_on_run {
            self.console.show();
        }
        ExecutionPipeline::new(&self.context, self.host.as_ref())
            .run(editor, &mut self.console)
            .await
    }

    /// Show or hide the console, returning the new visibility
    pub fn toggle_console(&mut self) -> bool {
        let visible = self.console.toggle();
        debug!(visible, "Console toggled");
        visible
    }

    /// Remove every console line
    pub fn clear_console(&mut self) {
        self.console.clear();
    }

    /// Execute a parsed command
    ///
    /// Only `Run` produces a record.
    pub async fn dispatch(
        &mut self,
        command: SessionCommand,
        editor: &dyn EditorProvider,
    ) -> Result<Option<RunRecord>> {
        match command {
            SessionCommand::Run => self.run(editor).await.map(Some),
            SessionCommand::ToggleConsole => {
                self.toggle_console();
                Ok(None)
            }
            SessionCommand::ClearConsole => {
                self.clear_console();
                Ok(None)
            }
        }
    }

    /// State to persist with the editor workspace
    pub fn serialize(&self) -> SessionState {
        SessionState::default()
    }

    /// Tear the session down, returning the console
    pub fn deactivate(mut self) -> C {
        self.console.hide();
        self.console.clear();
        self.console
    }
}
