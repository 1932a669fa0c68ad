//! .NET CLI build invoker
//!
//! Implements the BuildInvoker trait by running `dotnet` (or the configured
//! program) inside the workspace directory.

use crate::cache::Workspace;
use crate::error::{SprintError, SprintResult};
use crate::toolchain::invoker::{BuildInvoker, Captured, Step};
use crate::toolchain::{combined_output, Status};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Build invoker using the .NET CLI
pub struct DotnetInvoker {
    program: String,
    verbose: bool,
    binlog: bool,
}

impl DotnetInvoker {
    /// Create an invoker running `program`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            verbose: false,
            binlog: false,
        }
    }

    /// Echo captured output even when a step succeeds
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Ask the build to write binary logs next to the source
    pub fn with_binlog(mut self, binlog: bool) -> Self {
        self.binlog = binlog;
        self
    }

    /// Arguments for a step
    fn args(&self, step: Step, workspace: &Workspace) -> Vec<String> {
        let project = workspace.project_file().to_string_lossy().into_owned();
        let mut args: Vec<String> = match step {
            Step::Restore => vec!["msbuild", "-t:restore", "-v:q", "-nologo"],
            Step::Build => vec![
                "build",
                "-nologo",
                "-v:q",
                "-consoleLoggerParameters:NoSummary",
            ],
            Step::Run => vec!["run", "--no-build", "--project"],
            Step::Watch => vec!["watch", "--project"],
        }
        .into_iter()
        .map(String::from)
        .collect();

        if let Some(log) = self.binlog_path(step, workspace.source()) {
            debug!("Writing log file to: {}", log.display());
            args.push(format!("-bl:{}", log.display()));
        }
        args.push(project);
        args
    }

    fn binlog_path(&self, step: Step, source: &Path) -> Option<PathBuf> {
        if !self.binlog {
            return None;
        }
        match step {
            Step::Restore => Some(source.with_extension("restore.binlog")),
            Step::Build => Some(source.with_extension("binlog")),
            Step::Run | Step::Watch => None,
        }
    }

    /// Execute a step with captured output
    ///
    /// The output is handed back when verbose or when the step failed, with
    /// workspace paths pointing back at the user's source directory.
    async fn exec_captured(&self, step: Step, workspace: &Workspace) -> SprintResult<Captured> {
        let args = self.args(step, workspace);
        debug!("{} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(workspace.dir())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| SprintError::command_failed(format!("{} {}", self.program, step), e))?;

        let status = Status::from_exit(output.status);
        if !status.success() {
            debug!("{} failed with {}", step, status);
        }
        if !self.verbose && status.success() {
            return Ok(Captured::quiet(status));
        }

        let text = combined_output(&output.stdout, &output.stderr);
        Ok(Captured {
            status,
            output: Some(workspace.rewrite_paths(&text)),
        })
    }

    /// Execute a step interactively
    async fn exec_interactive(&self, step: Step, workspace: &Workspace) -> SprintResult<Status> {
        let args = self.args(step, workspace);
        debug!("{} {}", self.program, args.join(" "));

        let status = Command::new(&self.program)
            .args(&args)
            .current_dir(workspace.dir())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| SprintError::command_failed(format!("{} {}", self.program, step), e))?;

        Ok(Status::from_exit(status))
    }
}

impl Default for DotnetInvoker {
    fn default() -> Self {
        Self::new("dotnet")
    }
}

#[async_trait]
impl BuildInvoker for DotnetInvoker {
    async fn restore(&self, workspace: &Workspace) -> SprintResult<Captured> {
        self.exec_captured(Step::Restore, workspace).await
    }

    async fn build(&self, workspace: &Workspace) -> SprintResult<Captured> {
        self.exec_captured(Step::Build, workspace).await
    }

    async fn run(&self, workspace: &Workspace) -> SprintResult<Status> {
        self.exec_interactive(Step::Run, workspace).await
    }

    async fn watch(&self, workspace: &Workspace) -> SprintResult<Status> {
        self.exec_interactive(Step::Watch, workspace).await
    }

    fn toolchain_name(&self) -> &str {
        &self.program
    }
}
