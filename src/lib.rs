//! Sprint - run a single annotated .NET source file
//!
//! Reads package, SDK and framework directives from the comments of a
//! `.cs`, `.vb` or `.fs` file, generates a throwaway project for it in a
//! cached workspace, and drives the .NET toolchain to restore, build, run
//! or watch it.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod project;
pub mod toolchain;
pub mod ui;
pub mod watch;

pub use error::{SprintError, SprintResult};
