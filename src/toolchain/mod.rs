//! Build toolchain invocation
//!
//! Sprint only prepares workspaces; restoring, compiling and running them
//! is delegated to an external toolchain behind [`BuildInvoker`]:
//! - `DotnetInvoker`: the `dotnet` CLI (or a configured replacement)

mod dotnet;
mod invoker;

pub use dotnet::DotnetInvoker;
pub use invoker::{BuildInvoker, Captured, Step};

use std::fmt;

/// Exit status of an external step, passed through verbatim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(i32);

impl Status {
    /// Successful status
    pub const SUCCESS: Self = Self(0);

    /// Wrap a raw exit code
    pub fn from_code(code: i32) -> Self {
        Self(code)
    }

    /// Convert a process exit status; termination by signal maps to -1
    pub fn from_exit(status: std::process::ExitStatus) -> Self {
        Self(status.code().unwrap_or(-1))
    }

    /// Raw exit code
    pub fn code(&self) -> i32 {
        self.0
    }

    /// Whether the step succeeded
    pub fn success(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exit code {}", self.0)
    }
}

/// Combine captured stdout and stderr into one block of text
pub(crate) fn combined_output(stdout: &[u8], stderr: &[u8]) -> String {
    let stdout = String::from_utf8_lossy(stdout);
    let stderr = String::from_utf8_lossy(stderr);
    match (stdout.trim_end().is_empty(), stderr.trim_end().is_empty()) {
        (_, true) => stdout.into_owned(),
        (true, false) => stderr.into_owned(),
        (false, false) => format!("{}\n{}", stdout.trim_end(), stderr),
    }
}
