//! psbridge - run ExtendScript files in Adobe Photoshop
//!
//! Sends a script to Photoshop, waits for it to finish, and prints the log
//! the script wrote along with timing and the script's result.

use std::env;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tracing::{debug, error, info, warn};

use psbridge::config::loader::ConfigLoader;
use psbridge::{
    init, init_with_config, BridgeContext, BridgeSession, Config, FileEditor, LineRenderer,
    OsascriptHost, SessionCommand, TerminalConsole,
};

#[derive(Parser, Debug)]
#[command(name = "psbridge")]
#[command(about = "Run ExtendScript files in Adobe Photoshop and stream their log")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, short = 'c', global = true, env = "PSBRIDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    /// Disable coloured console output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a script once and print its console output
    Run {
        /// Script to run
        file: PathBuf,

        /// Read the unsaved editor buffer from standard input
        #[arg(long)]
        stdin: bool,
    },
    /// Read commands (run, toggle-console, clear-console, quit) from standard input
    Session {
        /// Script the session runs
        file: PathBuf,
    },
    /// Print the effective configuration
    Config {
        /// Write the default configuration to the default location
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match execute(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("psbridge: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(debug: bool) {
    let debug = debug
        || env::var("PSBRIDGE_DEBUG")
            .map_or(false, |v| v == "1" || v.eq_ignore_ascii_case("true"));
    let log_level = if debug { "debug" } else { "warn" };

    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from(env_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

async fn execute(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_configuration(&cli)?;
    let color = config.console.color && !cli.no_color && std::io::stdout().is_terminal();

    match cli.command {
        Command::Run { file, stdin } => {
            let editor = if stdin {
                let mut buffer = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut buffer)
                    .await
                    .context("reading editor buffer from stdin")?;
                FileEditor::with_buffer(file, buffer)
            } else {
                FileEditor::new(file)
            };

            let mut session = create_session(&config, color)?;
            session.set_show_on_run(true);
            Ok(match session.run(&editor).await {
                Ok(record) if record.is_successful() => ExitCode::SUCCESS,
                Ok(_) => ExitCode::FAILURE,
                Err(e) => {
                    debug!("Run failed: {}", e);
                    ExitCode::FAILURE
                }
            })
        }
        Command::Session { file } => {
            let mut session = create_session(&config, color)?;
            run_session(&mut session, FileEditor::new(file)).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Config { init } => {
            if init {
                let path = ConfigLoader::get_default_config_path();
                ConfigLoader::new()
                    .save_to_path(&Config::default(), &path)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("{}", path.display());
            } else {
                print!("{}", config.to_toml()?);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Load configuration from file or use defaults
fn load_configuration(cli: &Cli) -> anyhow::Result<Config> {
    match &cli.config {
        Some(path) => match init_with_config(path) {
            Ok(config) => {
                info!("Configuration loaded from: {}", path.display());
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to load config from {}: {}", path.display(), e);
                info!("Falling back to default configuration");
                Ok(Config::default())
            }
        },
        None => Ok(init()?),
    }
}

fn create_session(
    config: &Config,
    color: bool,
) -> anyhow::Result<BridgeSession<TerminalConsole<std::io::Stdout>>> {
    let context = BridgeContext::from_config(config);
    context
        .prepare()
        .with_context(|| format!("preparing {}", context.script_path.display()))?;

    let console = TerminalConsole::new(std::io::stdout(), LineRenderer::new(color));
    let mut session = BridgeSession::new(context, Box::new(OsascriptHost::new()), console);
    session.set_show_on_run(config.console.show_on_run);
    Ok(session)
}

async fn run_session(
    session: &mut BridgeSession<TerminalConsole<std::io::Stdout>>,
    editor: FileEditor,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("reading command")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }

        match line.parse::<SessionCommand>() {
            Ok(command) => {
                debug!("Executing {}", command.name());
                if let Err(e) = session.dispatch(command, &editor).await {
                    debug!("{} failed: {}", command.name(), e);
                }
            }
            Err(e) => eprintln!("psbridge: {}", e),
        }
    }

    let state = serde_json::to_string(&session.serialize())?;
    debug!(state = %state, "Session closed");
    Ok(())
}
