//! CLI command implementations

pub mod graduate;
pub mod prepare;
pub mod run;
pub mod watch;

pub use graduate::execute as graduate;
pub use prepare::execute as prepare;
pub use run::execute as run;
pub use watch::execute as watch;

use crate::cache::Workspace;
use crate::cli::args::{Action, OutputArgs};
use crate::config::Config;
use crate::error::{SprintError, SprintResult};
use crate::parser::Language;
use crate::project::{Materializer, Pipeline};
use crate::toolchain::{DotnetInvoker, Status};
use crate::ui::UiContext;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Execute an action
pub async fn dispatch(action: Action, output: OutputArgs, config: &Config) -> SprintResult<Status> {
    match action {
        Action::Run(file) => run(&file, output, config).await,
        Action::Prepare(file) => prepare(&file, output, config).await,
        Action::Watch(file) => watch(&file, output, config).await,
        Action::Graduate(file) => graduate(&file).await,
    }
}

/// Validate the source file and build the pipeline for it
///
/// Fails before touching the workspace when the file is missing or its
/// extension has no known language.
pub(crate) fn open(file: &Path, output: OutputArgs, config: &Config) -> SprintResult<Pipeline> {
    let (source, language) = locate(file)?;

    let root = config.cache.root();
    let workspace = Workspace::resolve(&root, &source, language)?;
    debug!("Workspace: {}", workspace.dir().display());

    let invoker = DotnetInvoker::new(config.toolchain.program.clone())
        .with_verbose(output.verbose)
        .with_binlog(output.binlog);

    let ui = UiContext::detect().with_verbose(output.verbose);

    let pipeline = Pipeline::new(
        workspace,
        language,
        Materializer::new(config.cache.sample_limit),
        Arc::new(invoker),
    )
    .with_ui(ui);
    debug!("Using toolchain: {}", pipeline.invoker().toolchain_name());

    Ok(pipeline)
}

/// Check the file exists and has a supported extension, returning its
/// absolute path
pub(crate) fn locate(file: &Path) -> SprintResult<(PathBuf, Language)> {
    if !file.is_file() {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        return Err(SprintError::SourceNotFound(name));
    }

    let language = Language::detect(file)?;
    let source = file
        .canonicalize()
        .map_err(|e| SprintError::io(format!("resolving {}", file.display()), e))?;
    debug!("Source: {} ({})", source.display(), language);

    Ok((source, language))
}
