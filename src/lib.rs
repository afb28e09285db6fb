//! psbridge - run ExtendScript files in Adobe Photoshop from the command line
//!
//! This library hands a script from an editor (or the shell) to a running
//! Photoshop, waits for Photoshop's script engine to finish, and streams the
//! log the script wrote back into a console.
//!
//! ## How a run works
//!
//! The bridge talks to Photoshop through two fixed files and three OS
//! commands:
//!
//! - the **script file**, rewritten on every run with a helper include
//!   followed by the document (inline when unsaved, `#include`d otherwise)
//! - the **log file**, emptied at the start of every run and appended to by
//!   the helper's `log()` function while the script runs
//! - `mdfind` to locate the installed Photoshop, `open -a` to launch it,
//!   and `osascript` to make it `do javascript` the script file
//!
//! ## Module Organization
//!
//! - [`pipeline`] - the run sequence and the [`BridgeContext`] it works in
//! - [`session`] - user-facing commands (run, toggle console, clear console)
//! - [`host`] - host discovery, launch and dispatch ([`HostDriver`])
//! - [`script`] - script assembly, script file, helper include
//! - [`log_reader`] - log file reset and parsing
//! - [`console`] - console sink, in-memory view, terminal rendering
//! - [`editor`] - active document providers
//! - [`config`] - configuration model and file loading
//! - [`models`] - console lines, editor snapshots, run records
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```no_run
//! use psbridge::{init, BridgeContext, ConsoleView, ExecutionPipeline, FileEditor, OsascriptHost};
//!
//! # async fn demo() -> psbridge::Result<()> {
//! let config = init()?;
//! let context = BridgeContext::from_config(&config);
//! context.prepare()?;
//!
//! let host = OsascriptHost::new();
//! let mut console = ConsoleView::new();
//! ExecutionPipeline::new(&context, &host)
//!     .run(&FileEditor::new("hello.jsx"), &mut console)
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Platform Support
//!
//! Discovery, launch and dispatch rely on macOS tools. Everything else
//! builds and runs anywhere; on other platforms runs fail at discovery.

#[macro_use]
extern crate tracing;

pub mod config;
pub mod console;
pub mod editor;
pub mod error;
pub mod host;
pub mod log_reader;
pub mod models;
pub mod pipeline;
pub mod script;
pub mod session;

// Re-exports for core functionality
pub use config::Config;
pub use console::{ConsoleSink, ConsoleView, LineRenderer, TerminalConsole};
pub use editor::{EditorProvider, FileEditor};
pub use error::{Error, Result};
pub use host::{DispatchOutput, HostDriver, OsascriptHost};
pub use models::{ConsoleLine, EditorSnapshot, RunRecord, RunStatus, Severity};
pub use pipeline::{BridgeContext, ExecutionPipeline};
pub use session::{BridgeSession, SessionCommand, SessionState};

// Convenience re-exports for common types
pub use config::loader::ConfigLoader;

// Version information
/// The current version of psbridge from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The application name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Load configuration from the default locations
///
/// Falls back to the built-in defaults when no file is found or the file
/// found cannot be used.
pub fn init() -> Result<Config> {
    info!("Initializing {} v{}", NAME, VERSION);

    validate_system_requirements();

    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load configuration: {}. Using defaults", e);
            Config::default()
        }
    };

    Ok(config)
}

/// Load configuration from a specific file
pub fn init_with_config(config_path: &std::path::Path) -> Result<Config> {
    info!(
        "Initializing {} v{} with config: {}",
        NAME,
        VERSION,
        config_path.display()
    );

    validate_system_requirements();

    Config::load_from_file(config_path).map_err(|e| {
        error!(
            "Failed to load configuration from {}: {}",
            config_path.display(),
            e
        );
        e
    })
}

fn validate_system_requirements() {
    #[cfg(not(target_os = "macos"))]
    {
        warn!("Not running on macOS - the host application cannot be reached");
    }
}
