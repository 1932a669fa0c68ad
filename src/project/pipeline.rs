//! Parse, materialize and build one source file

use crate::cache::Workspace;
use crate::error::{SprintError, SprintResult};
use crate::parser::{self, Language};
use crate::project::materializer::{Materialized, Materializer};
use crate::toolchain::{BuildInvoker, Captured, Status, Step};
use crate::ui::{TaskSpinner, UiContext};
use std::future::Future;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

/// Everything needed to drive one source file through the toolchain
pub struct Pipeline {
    workspace: Workspace,
    language: Language,
    materializer: Materializer,
    invoker: Arc<dyn BuildInvoker>,
    ui: UiContext,
}

impl Pipeline {
    /// Create a pipeline for `workspace`
    pub fn new(
        workspace: Workspace,
        language: Language,
        materializer: Materializer,
        invoker: Arc<dyn BuildInvoker>,
    ) -> Self {
        Self {
            workspace,
            language,
            materializer,
            invoker,
            ui: UiContext::non_interactive(),
        }
    }

    /// Use `ui` to decide whether spinners are drawn
    pub fn with_ui(mut self, ui: UiContext) -> Self {
        self.ui = ui;
        self
    }

    /// The workspace this pipeline materializes into
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// The toolchain steps run through
    pub fn invoker(&self) -> &dyn BuildInvoker {
        self.invoker.as_ref()
    }

    /// Re-read the source and bring the workspace up to date
    pub async fn sync(&self) -> SprintResult<Materialized> {
        let source = self.workspace.source();
        let bytes = fs::read(source)
            .await
            .map_err(|e| SprintError::io(format!("reading {}", source.display()), e))?;

        let text = String::from_utf8_lossy(&bytes);
        let descriptor = parser::parse_source(&text, self.language);
        debug!(
            "Parsed {}: {} package(s), sdk {}, target {}",
            self.workspace.file_name(),
            descriptor.packages().len(),
            descriptor.sdk(),
            descriptor.target_framework()
        );

        self.materializer
            .materialize(&self.workspace, &bytes, &descriptor)
            .await
    }

    /// Materialize, then restore and build if anything changed
    ///
    /// Returns the status of the first failing step. An up-to-date
    /// workspace skips both steps and succeeds.
    pub async fn prepare(&self, restore: bool, build: bool) -> SprintResult<Status> {
        let outcome = self.sync().await?;
        if !outcome.is_regenerated() {
            debug!("No prep required");
            return Ok(Status::SUCCESS);
        }

        if restore {
            let restore = self.invoker.restore(&self.workspace);
            let status = self.step(Step::Restore, "Restoring project...", restore).await?;
            if !status.success() {
                return Ok(status);
            }
        }

        if build {
            let build = self.invoker.build(&self.workspace);
            let status = self.step(Step::Build, "Building project...", build).await?;
            if !status.success() {
                return Ok(status);
            }
        }

        Ok(Status::SUCCESS)
    }

    /// Run the built program
    pub async fn run(&self) -> SprintResult<Status> {
        info!("Running {}", self.workspace.file_name());
        self.invoker.run(&self.workspace).await
    }

    /// Await a captured step behind a spinner, then show its output
    async fn step<F>(&self, step: Step, message: &str, pending: F) -> SprintResult<Status>
    where
        F: Future<Output = SprintResult<Captured>>,
    {
        debug!("{}", message);
        let mut spinner = TaskSpinner::new(&self.ui);
        spinner.start(message);
        let captured = pending.await;
        spinner.clear();

        let Captured { status, output } = captured?;
        if let Some(output) = output {
            print!("{}", output);
        }
        if !status.success() {
            debug!("{} failed with {}", step, status);
        }
        Ok(status)
    }
}
