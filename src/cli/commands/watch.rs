//! Watch command - keep the project in sync while the toolchain watches it

use super::open;
use crate::cli::args::OutputArgs;
use crate::config::Config;
use crate::error::SprintResult;
use crate::toolchain::Status;
use crate::watch;
use std::path::Path;
use std::time::Duration;
use tokio::signal;
use tracing::{debug, info};

/// Exit status reported when the session is interrupted
const INTERRUPTED: i32 = 130;

/// Execute the watch command
pub async fn execute(file: &Path, output: OutputArgs, config: &Config) -> SprintResult<Status> {
    let pipeline = open(file, output, config)?;

    let status = pipeline.prepare(true, true).await?;
    if !status.success() {
        debug!("Preparation failed with {}", status);
        return Ok(status);
    }

    let window = Duration::from_millis(config.watch.debounce_ms);

    // Dropping the session kills the external watch process
    tokio::select! {
        status = watch::run_session(&pipeline, window) => status,
        _ = signal::ctrl_c() => {
            info!("Received SIGINT signal (Ctrl+C)");
            Ok(Status::from_code(INTERRUPTED))
        }
    }
}
