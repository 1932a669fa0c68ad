//! Graduate command - turn a single file into a standalone project

use super::locate;
use crate::error::{SprintError, SprintResult};
use crate::parser;
use crate::toolchain::Status;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Execute the graduate command
///
/// Validates and parses the file, keeping the program text without its
/// directives, then stops: writing the standalone project is not available
/// yet.
pub async fn execute(file: &Path) -> SprintResult<Status> {
    let (source, language) = locate(file)?;

    let bytes = fs::read(&source)
        .await
        .map_err(|e| SprintError::io(format!("reading {}", source.display()), e))?;
    let text = String::from_utf8_lossy(&bytes);
    let (descriptor, program) = parser::parse_with_program(text.lines(), language.comment_marker());
    debug!(
        "Graduate candidate: {} package(s), {} byte(s) of program text",
        descriptor.packages().len(),
        program.len()
    );

    Err(SprintError::GraduateUnsupported(source))
}
