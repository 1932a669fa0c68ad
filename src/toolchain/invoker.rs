//! Build invoker abstraction
//!
//! Provides a trait for the external steps Sprint drives, so the pipeline
//! can be exercised without a .NET SDK installed.

use crate::cache::Workspace;
use crate::error::SprintResult;
use crate::toolchain::Status;
use async_trait::async_trait;
use std::fmt;

/// External steps run against a workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Restore package references
    Restore,
    /// Compile the project
    Build,
    /// Execute the built program
    Run,
    /// Continuous rebuild-and-run loop
    Watch,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Restore => "restore",
            Self::Build => "build",
            Self::Run => "run",
            Self::Watch => "watch",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of a step whose output was captured
///
/// `output` holds the text to show the user, if any. It is printed by the
/// caller once progress indicators are out of the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub status: Status,
    pub output: Option<String>,
}

impl Captured {
    /// A step with nothing to show
    pub fn quiet(status: Status) -> Self {
        Self {
            status,
            output: None,
        }
    }
}

/// Abstract build toolchain interface
///
/// Every method blocks (asynchronously) until the external process exits
/// and reports its status. Restore and build capture their output instead
/// of writing it. Only a failure to start the process is an
/// error; a non-zero exit is a [`Status`].
#[async_trait]
pub trait BuildInvoker: Send + Sync {
    /// Restore the project's package references
    async fn restore(&self, workspace: &Workspace) -> SprintResult<Captured>;

    /// Build the project
    async fn build(&self, workspace: &Workspace) -> SprintResult<Captured>;

    /// Run the already built program with inherited stdio
    async fn run(&self, workspace: &Workspace) -> SprintResult<Status>;

    /// Run the toolchain's own watch loop with inherited stdio
    async fn watch(&self, workspace: &Workspace) -> SprintResult<Status>;

    /// Get the human-readable toolchain name for display
    fn toolchain_name(&self) -> &str;
}
