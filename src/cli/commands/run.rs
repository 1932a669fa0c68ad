//! Run command - prepare the project, then run the program

use super::open;
use crate::cli::args::OutputArgs;
use crate::config::Config;
use crate::error::SprintResult;
use crate::toolchain::Status;
use std::path::Path;
use tracing::debug;

/// Execute the run command
///
/// The program's exit code becomes ours. A failing restore or build is
/// returned as-is and the program is not started.
pub async fn execute(file: &Path, output: OutputArgs, config: &Config) -> SprintResult<Status> {
    let pipeline = open(file, output, config)?;

    let status = pipeline.prepare(true, true).await?;
    if !status.success() {
        debug!("Preparation failed with {}", status);
        return Ok(status);
    }

    pipeline.run().await
}
