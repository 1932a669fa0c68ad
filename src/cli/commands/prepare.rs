//! Prepare command - generate and restore the project without building

use super::open;
use crate::cli::args::OutputArgs;
use crate::config::Config;
use crate::error::SprintResult;
use crate::toolchain::Status;
use std::path::Path;

/// Execute the prepare command
///
/// Leaves a restored project behind for editors and language servers.
pub async fn execute(file: &Path, output: OutputArgs, config: &Config) -> SprintResult<Status> {
    let pipeline = open(file, output, config)?;
    pipeline.prepare(true, false).await
}
