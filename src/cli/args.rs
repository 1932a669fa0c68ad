//! CLI argument definitions using clap derive

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Sprint - run a single annotated .NET source file
///
/// Package references, SDK and target framework are read from comment
/// directives at the top of the file. A throwaway project is generated and
/// rebuilt only when the file changes.
#[derive(Parser, Debug)]
#[command(name = "sprint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct Cli {
    /// Subcommand to execute (runs the file when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Source file to run (.cs, .vb, .fs)
    #[arg(required = true, value_name = "FILE")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SPRINT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Flags shared by every command
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct OutputArgs {
    /// Echo toolchain output and debug logs even when steps succeed
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write MSBuild binary logs next to the source file
    #[arg(short, long, global = true)]
    pub binlog: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate, restore and build the project without running it
    Prepare(SourceArgs),

    /// Run the toolchain's watch loop, keeping the project in sync with the file
    Watch(SourceArgs),

    /// Convert the file into a standalone project
    #[command(hide = true)]
    Graduate(SourceArgs),
}

/// Arguments naming the source file
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Source file (.cs, .vb, .fs)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// What the invocation asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Run(PathBuf),
    Prepare(PathBuf),
    Watch(PathBuf),
    Graduate(PathBuf),
}

impl Action {
    /// Source file the action operates on
    pub fn file(&self) -> &Path {
        match self {
            Self::Run(file) | Self::Prepare(file) | Self::Watch(file) | Self::Graduate(file) => {
                file
            }
        }
    }
}

impl Cli {
    /// Resolve the subcommand or the bare file argument into an action
    ///
    /// `None` only when neither was given, which clap already rejects.
    pub fn action(&self) -> Option<Action> {
        match &self.command {
            Some(Commands::Prepare(args)) => Some(Action::Prepare(args.file.clone())),
            Some(Commands::Watch(args)) => Some(Action::Watch(args.file.clone())),
            Some(Commands::Graduate(args)) => Some(Action::Graduate(args.file.clone())),
            None => self.file.clone().map(Action::Run),
        }
    }
}
