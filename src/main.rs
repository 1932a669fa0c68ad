//! Sprint - run a single annotated .NET source file
//!
//! CLI entry point that dispatches to subcommands.

use clap::{CommandFactory, Parser};
use console::style;
use sprint::cli::Cli;
use sprint::config::{Config, ConfigManager};
use sprint::error::{SprintError, SprintResult};
use sprint::toolchain::Status;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(status) => exit_code(status.code()),
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            exit_code(e.exit_code())
        }
    }
}

async fn run() -> SprintResult<Status> {
    let cli = Cli::parse();
    let Some(action) = cli.action() else {
        Cli::command().print_help().map_err(|e| SprintError::io("printing help", e))?;
        return Err(SprintError::Internal("no source file given".to_string()));
    };

    // Load configuration
    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    init_logging(&config, cli.output.verbose);
    debug!("Config: {}", config_manager.path().display());

    sprint::cli::commands::dispatch(action, cli.output, &config).await
}

/// Install the tracing subscriber: warn by default, debug with --verbose,
/// RUST_LOG wins over both
fn init_logging(config: &Config, verbose: bool) {
    let default = if verbose { "sprint=debug" } else { "sprint=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Map a status code onto the process exit code, so -1 becomes 255
fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(code as u8)
}
