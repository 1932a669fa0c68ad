//! Error types for Sprint
//!
//! All modules use `SprintResult<T>` as their return type. A failing
//! external tool is not an error: its exit code travels back as a
//! [`Status`](crate::toolchain::Status) instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Sprint operations
pub type SprintResult<T> = Result<T, SprintError>;

/// All errors that can occur in Sprint
#[derive(Error, Debug)]
pub enum SprintError {
    // User input errors
    #[error("File {0} does not exist.")]
    SourceNotFound(String),

    #[error("File extension {extension} is not supported.")]
    UnsupportedExtension {
        extension: String,
        supported: String,
    },

    #[error("Graduating {0} into a full project is not implemented yet")]
    GraduateUnsupported(PathBuf),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // Workspace errors
    #[error("Source path has no parent directory: {0}")]
    NoParentDirectory(PathBuf),

    #[error("Failed to watch {path}: {reason}")]
    Watch { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SprintError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Process exit code reported for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::SourceNotFound(_) => -1,
            Self::UnsupportedExtension { .. } => -2,
            _ => 1,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::UnsupportedExtension { supported, .. } => {
                Some(format!("Supported extensions are: {supported}"))
            }
            Self::CommandFailed { .. } => {
                Some("Is the .NET SDK installed and on PATH? See toolchain.program in the config".to_string())
            }
            Self::ConfigInvalid { .. } => Some("Check the file or pass --config".to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SprintError::SourceNotFound("foo.cs".to_string());
        assert_eq!(err.to_string(), "File foo.cs does not exist.");
    }

    #[test]
    fn user_input_exit_codes() {
        assert_eq!(SprintError::SourceNotFound("a.cs".into()).exit_code(), -1);
        let err = SprintError::UnsupportedExtension {
            extension: ".py".into(),
            supported: ".cs, .vb, .fs".into(),
        };
        assert_eq!(err.exit_code(), -2);
        assert_eq!(err.hint().as_deref(), Some("Supported extensions are: .cs, .vb, .fs"));
    }

    #[test]
    fn filesystem_errors_are_fatal() {
        let err = SprintError::io("writing cache record", std::io::Error::other("disk full"));
        assert_eq!(err.exit_code(), 1);
        assert!(err.hint().is_none());
    }
}
