//! Directive parser
//!
//! Extracts a [`ProjectDescriptor`] from the comment directives of a source
//! file:
//!
//! ```text
//! #!/usr/bin/env sprint
//! // nuget: Newtonsoft.Json 13.0.1
//! // sdk: Microsoft.NET.Sdk.Web
//! // targetframework: net8.0
//! ```
//!
//! Parsing is a fold over the lines. A malformed directive never fails the
//! parse; the line is treated as ordinary program text instead.

mod descriptor;
mod language;

pub use descriptor::{
    PackageReference, ProjectDescriptor, ANY_VERSION, DEFAULT_SDK, DEFAULT_TARGET_FRAMEWORK,
};
pub use language::Language;

use crate::error::{SprintError, SprintResult};
use std::path::Path;
use tracing::trace;

const HASHBANG: &str = "#!";

/// UTF-8 byte order mark, as editors on Windows save it
const BOM: char = '\u{FEFF}';

/// A recognized directive
#[derive(Debug, Clone, PartialEq, Eq)]
enum Directive {
    Package(PackageReference),
    Sdk(String),
    TargetFramework(String),
}

/// Parser accumulator, threaded through the fold one line at a time
#[derive(Debug, Default)]
struct ParseState {
    descriptor: ProjectDescriptor,
    program: Option<Vec<String>>,
}

impl ParseState {
    fn with_program() -> Self {
        Self {
            program: Some(Vec::new()),
            ..Self::default()
        }
    }

    fn fold(mut self, marker: &str, index: usize, line: &str) -> Self {
        let line = match index {
            0 => line.strip_prefix(BOM).unwrap_or(line),
            _ => line,
        };
        if index == 0 && line.starts_with(HASHBANG) {
            self.descriptor.has_hashbang = true;
            return self;
        }

        match parse_directive(line.trim(), marker) {
            Some(Directive::Package(pkg)) => self.descriptor.packages.push(pkg),
            Some(Directive::Sdk(sdk)) => self.descriptor.sdk = sdk,
            Some(Directive::TargetFramework(tfm)) => self.descriptor.target_framework = tfm,
            None => {
                if let Some(program) = self.program.as_mut() {
                    program.push(line.to_string());
                }
            }
        }
        self
    }
}

/// Parse directive lines into a project descriptor
pub fn parse<'a, I>(lines: I, marker: &str) -> ProjectDescriptor
where
    I: IntoIterator<Item = &'a str>,
{
    run(ParseState::default(), lines, marker).descriptor
}

/// Parse directive lines, also collecting every non-directive line
///
/// The returned program text keeps the original lines (untrimmed) in order,
/// without the hashbang and without any recognized directive.
pub fn parse_with_program<'a, I>(lines: I, marker: &str) -> (ProjectDescriptor, String)
where
    I: IntoIterator<Item = &'a str>,
{
    let state = run(ParseState::with_program(), lines, marker);
    let program = state.program.unwrap_or_default();
    let mut text = program.join("\n");
    if !program.is_empty() {
        text.push('\n');
    }
    (state.descriptor, text)
}

/// Parse source text written in `language`
pub fn parse_source(text: &str, language: Language) -> ProjectDescriptor {
    parse(text.lines(), language.comment_marker())
}

/// Read and parse a source file
pub async fn parse_file(path: &Path, language: Language) -> SprintResult<ProjectDescriptor> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| SprintError::io(format!("reading {}", path.display()), e))?;
    Ok(parse_source(&String::from_utf8_lossy(&bytes), language))
}

fn run<'a, I>(init: ParseState, lines: I, marker: &str) -> ParseState
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .enumerate()
        .fold(init, |state, (index, line)| state.fold(marker, index, line))
}

/// Recognize a trimmed line as a directive
fn parse_directive(line: &str, marker: &str) -> Option<Directive> {
    let body = line.strip_prefix(marker)?;
    let (key, arguments) = body.split_once(':')?;
    let arguments = arguments.trim();

    let directive = match key.trim().to_lowercase().as_str() {
        "nuget" => parse_package(arguments).map(Directive::Package),
        "sdk" => single_value(arguments).map(Directive::Sdk),
        "targetframework" => single_value(arguments).map(Directive::TargetFramework),
        _ => None,
    };

    if directive.is_none() {
        trace!("Not a directive: {}", line);
    }
    directive
}

/// `nuget: Name [Version [Feed]]`
fn parse_package(arguments: &str) -> Option<PackageReference> {
    let parts: Vec<&str> = arguments.split_whitespace().collect();
    match parts.as_slice() {
        [name] => Some(PackageReference::new(*name, None, None)),
        [name, version] => Some(PackageReference::new(*name, Some(version.to_string()), None)),
        [name, version, feed] => Some(PackageReference::new(
            *name,
            Some(version.to_string()),
            Some(feed.to_string()),
        )),
        _ => None,
    }
}

fn single_value(arguments: &str) -> Option<String> {
    if arguments.is_empty() || arguments.contains(char::is_whitespace) {
        return None;
    }
    Some(arguments.to_string())
}
