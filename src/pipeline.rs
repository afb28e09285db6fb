//! Execution pipeline
//!
//! One run goes through a fixed sequence of stages:
//!
//! 1. empty the log file
//! 2. capture the active document
//! 3. assemble the script (helper include + document)
//! 4. write it to the script file
//! 5. find the installed host
//! 6. open the host
//! 7. ask the host to run the script file and wait
//! 8. report timing, flush the log file, report the host's error/result
//!
//! Stages 2 to 6 abort the run on the first failure. The failure is shown
//! on the console as a single error line, except when no host is
//! installed, which leaves the console untouched. Stage 8 always runs once
//! the dispatch has returned, whatever the dispatch outcome.

use chrono::Local;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::console::ConsoleSink;
use crate::editor::EditorProvider;
use crate::error::{Error, Result};
use crate::host::{DispatchOutput, HostDriver};
use crate::log_reader::LogReader;
use crate::models::{RunRecord, Severity};
use crate::script::{install_helper, write_script, ScriptAssembler};

/// Everything a run needs to know, resolved once at startup
#[derive(Debug, Clone)]
pub struct BridgeContext {
    /// Bundle identifier of the host application
    pub bundle_id: String,
    /// Timeout wrapped around the dispatch on the host side
    pub dispatch_timeout: Duration,
    /// Helper include injected into every script
    pub helper_path: PathBuf,
    /// Script file handed to the host
    pub script_path: PathBuf,
    /// Log file written by the helper
    pub log_path: PathBuf,
    /// Separator between log entries
    pub log_delimiter: String,
}

impl BridgeContext {
    /// Resolve a context from configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            bundle_id: config.host.bundle_id.trim().to_string(),
            dispatch_timeout: Duration::from_secs(config.host.dispatch_timeout_secs),
            helper_path: config.paths.helper_path(),
            script_path: config.paths.script_path(),
            log_path: config.paths.log_path(),
            log_delimiter: config.console.delimiter.clone(),
        }
    }

    /// Create the hand-off directories and install the helper include
    pub fn prepare(&self) -> Result<()> {
        for path in [&self.script_path, &self.log_path] {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        if install_helper(&self.helper_path, &self.log_path, &self.log_delimiter)? {
            info!("Installed helper include at {}", self.helper_path.display());
        }
        Ok(())
    }

    /// Assembler injecting this context's helper
    pub fn assembler(&self) -> ScriptAssembler {
        ScriptAssembler::new(&self.helper_path)
    }

    /// Reader for this context's log file
    pub fn log_reader(&self) -> LogReader {
        LogReader::new(&self.log_path, &self.log_delimiter)
    }
}

/// Timing line reported after every dispatch
pub fn format_execution_time(elapsed: Duration) -> String {
    format!("Execution Time: {:.3} seconds", elapsed.as_secs_f64())
}

/// Runs scripts in the host, one at a time
pub struct ExecutionPipeline<'a> {
    context: &'a BridgeContext,
    host: &'a dyn HostDriver,
}

impl<'a> ExecutionPipeline<'a> {
    /// Create a pipeline over a context and a host driver
    pub fn new(context: &'a BridgeContext, host: &'a dyn HostDriver) -> Self {
        Self { context, host }
    }

    /// Execute one run end to end
    ///
    /// A failure to empty the log file is returned as is, before anything
    /// reaches the console. Every other stage failure is returned after
    /// being reported on the console (see [`Error::console_message`]),
    /// except for errors that are [`Error::is_silent`].
    pub async fn run(
        &self,
        editor: &dyn EditorProvider,
        sink: &mut dyn ConsoleSink,
    ) -> Result<RunRecord> {
        let started = Instant::now();
        let mut record = RunRecord::new(self.context.script_path.clone());
        let log_reader = self.context.log_reader();

        log_reader.reset()?;

        match self
            .execute(editor, &log_reader, started, &mut record, sink)
            .await
        {
            Ok(()) => Ok(record),
            Err(e) => {
                if e.is_silent() {
                    warn!("Run {} ended without output: {}", record.id, e);
                } else if let Some(message) = e.console_message() {
                    sink.append(&message, Severity::Error);
                }
                record.mark_failed(None, None);
                Err(e)
            }
        }
    }

    async fn execute(
        &self,
        editor: &dyn EditorProvider,
        log_reader: &LogReader,
        started: Instant,
        record: &mut RunRecord,
        sink: &mut dyn ConsoleSink,
    ) -> Result<()> {
        let ctx = self.context;

        let snapshot = editor.snapshot()?.ok_or(Error::NoActiveEditor)?;
        debug!(
            path = %snapshot.path.display(),
            modified = snapshot.is_modified,
            "Captured editor state"
        );

        let script = ctx.assembler().assemble(&snapshot);
        write_script(&ctx.script_path, &script).await?;

        let application = match self.host.discover(&ctx.bundle_id).await? {
            Some(application) => application,
            None => {
                warn!("No Photoshop installation found for {}", ctx.bundle_id);
                return Err(Error::HostNotFound {
                    bundle_id: ctx.bundle_id.clone(),
                });
            }
        };
        info!(application = %application, "Found host");

        self.host.launch(&application).await?;

        record.mark_running();
        let dispatched = self
            .host
            .dispatch(&ctx.bundle_id, &ctx.script_path, ctx.dispatch_timeout)
            .await;

        self.report_completion(dispatched, started.elapsed(), log_reader, record, sink);
        Ok(())
    }

    fn report_completion(
        &self,
        dispatched: Result<DispatchOutput>,
        elapsed: Duration,
        log_reader: &LogReader,
        record: &mut RunRecord,
        sink: &mut dyn ConsoleSink,
    ) {
        let stamp = Local::now().format("%H:%M:%S").to_string();

        sink.append(&format_execution_time(elapsed), Severity::Execution);

        if let Err(e) = log_reader.flush_to(sink) {
            warn!("{}", e);
            sink.append(&format!("Error: {}", e), Severity::Error);
        }

        match dispatched {
            Ok(output) => {
                if !output.success {
                    sink.append(
                        &format!("[{}] Error: {}", stamp, output.stderr.trim_end()),
                        Severity::Error,
                    );
                }

                let stdout = output.stdout.trim_end_matches(['\r', '\n']);
                if !stdout.is_empty() {
                    sink.append(&format!("[{}] Result: {}", stamp, stdout), Severity::Log);
                }

                if output.success {
                    record.mark_completed(elapsed, output.exit_code);
                } else {
                    record.mark_failed(Some(elapsed), output.exit_code);
                }
            }
            Err(e) => {
                sink.append(&format!("[{}] Error: {}", stamp, e), Severity::Error);
                record.mark_failed(Some(elapsed), None);
            }
        }

        info!(
            run = %record.id,
            elapsed_ms = elapsed.as_millis() as u64,
            status = ?record.status,
            "Run finished"
        );
    }
}
