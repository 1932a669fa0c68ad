//! Supported source languages and their comment markers

use crate::error::{SprintError, SprintResult};
use std::fmt;
use std::path::Path;

/// Source languages Sprint knows how to turn into a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// C# (.cs)
    CSharp,
    /// Visual Basic (.vb)
    VisualBasic,
    /// F# (.fs)
    FSharp,
}

impl Language {
    /// Get the file extension, including the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::CSharp => ".cs",
            Self::VisualBasic => ".vb",
            Self::FSharp => ".fs",
        }
    }

    /// Get the line comment marker that introduces a directive
    pub fn comment_marker(&self) -> &'static str {
        match self {
            Self::CSharp | Self::FSharp => "//",
            Self::VisualBasic => "'",
        }
    }

    /// Get the project file name, e.g. `temp.csproj`
    pub fn project_file_name(&self) -> String {
        format!("temp{}proj", self.extension())
    }

    /// All supported languages in display order
    pub fn all() -> &'static [Self] {
        &[Self::CSharp, Self::VisualBasic, Self::FSharp]
    }

    /// Look up a language by extension, with or without the leading dot
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.strip_prefix('.').unwrap_or(extension);
        Self::all()
            .iter()
            .copied()
            .find(|lang| &lang.extension()[1..] == extension)
    }

    /// Detect the language of a source path
    pub fn detect(path: &Path) -> SprintResult<Self> {
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        Self::from_extension(&extension).ok_or_else(|| SprintError::UnsupportedExtension {
            extension,
            supported: Self::supported_list(),
        })
    }

    /// Comma separated list of supported extensions
    pub fn supported_list() -> String {
        Self::all()
            .iter()
            .map(|lang| lang.extension())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CSharp => "C#",
            Self::VisualBasic => "Visual Basic",
            Self::FSharp => "F#",
        };
        write!(f, "{}", name)
    }
}
