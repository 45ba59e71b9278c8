//! Azathoth - a terminal work/rest interval timer
//!
//! Counts down a work interval, then a rest interval, forever.
//! An empty line on stdin pauses the countdown; another resumes it.

use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tokio::sync::mpsc;

use azathoth::cli::{Cli, Commands, Display};
use azathoth::engine::{control_channel, listen_stdin, TimerEngine};
use azathoth::terminal::{shutdown_signal, CursorGuard};
use azathoth::{Config, ConfigError};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        if let Some(config_error) = e.downcast_ref::<ConfigError>() {
            eprintln!("hint: {}", config_error.suggestion());
        }
        std::process::exit(1);
    }

    // The stdin reader blocks a runtime thread; exit without waiting for it.
    std::process::exit(0);
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
            Ok(())
        }
        None => run_timer(cli.timer.to_config()).await,
    }
}

/// Runs the timer until a shutdown signal arrives.
async fn run_timer(config: Config) -> Result<()> {
    config.validate()?;

    let mut cursor = CursorGuard::hide(io::stdout())?;
    let (control_tx, control_rx) = control_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        if let Err(e) = listen_stdin(control_tx).await {
            tracing::warn!("Input listener stopped: {:#}", e);
        }
    });
    tokio::spawn(Display::new(config.show_sub_second).run(event_rx));

    let engine = TimerEngine::new(config, control_rx, event_tx);
    let result = tokio::select! {
        result = engine.start() => result,
        result = shutdown_signal() => result,
    };

    cursor.restore()?;
    result
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
