//! Project descriptor produced by the directive parser

use std::fmt;

/// SDK used when no `sdk:` directive is present
pub const DEFAULT_SDK: &str = "Microsoft.NET.Sdk";

/// Target framework used when no `targetframework:` directive is present
pub const DEFAULT_TARGET_FRAMEWORK: &str = "net6.0";

/// Version constraint used when a `nuget:` directive names only the package
pub const ANY_VERSION: &str = "*";

/// A package dependency declared by a `nuget:` directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReference {
    name: String,
    version: String,
    feed: Option<String>,
}

impl PackageReference {
    /// Create a package reference. An absent version means any version.
    pub fn new(name: impl Into<String>, version: Option<String>, feed: Option<String>) -> Self {
        Self {
            name: name.into(),
            version: version.unwrap_or_else(|| ANY_VERSION.to_string()),
            feed,
        }
    }

    /// Package name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version constraint, `*` when unspecified
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Package feed, if one was given
    pub fn feed(&self) -> Option<&str> {
        self.feed.as_deref()
    }
}

impl fmt::Display for PackageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)?;
        if let Some(feed) = &self.feed {
            write!(f, " ({feed})")?;
        }
        Ok(())
    }
}

/// Everything the directives of a source file declare about its project
///
/// Only the parser constructs descriptors; consumers read them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    pub(crate) packages: Vec<PackageReference>,
    pub(crate) sdk: String,
    pub(crate) target_framework: String,
    pub(crate) has_hashbang: bool,
}

impl ProjectDescriptor {
    /// Declared packages in source order, duplicates included
    pub fn packages(&self) -> &[PackageReference] {
        &self.packages
    }

    /// MSBuild SDK for the project element
    pub fn sdk(&self) -> &str {
        &self.sdk
    }

    /// Target framework moniker
    pub fn target_framework(&self) -> &str {
        &self.target_framework
    }

    /// Whether the first line was a `#!` line
    pub fn has_hashbang(&self) -> bool {
        self.has_hashbang
    }
}

impl Default for ProjectDescriptor {
    fn default() -> Self {
        Self {
            packages: Vec::new(),
            sdk: DEFAULT_SDK.to_string(),
            target_framework: DEFAULT_TARGET_FRAMEWORK.to_string(),
            has_hashbang: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_defaults_to_wildcard() {
        let pkg = PackageReference::new("Humanizer", None, None);
        assert_eq!(pkg.version(), "*");
        assert_eq!(pkg.feed(), None);
        assert_eq!(pkg.to_string(), "Humanizer *");
    }

    #[test]
    fn display_includes_feed() {
        let pkg = PackageReference::new("Foo", Some("1.0".into()), Some("MyFeed".into()));
        assert_eq!(pkg.to_string(), "Foo 1.0 (MyFeed)");
    }

    #[test]
    fn default_descriptor() {
        let d = ProjectDescriptor::default();
        assert!(d.packages().is_empty());
        assert_eq!(d.sdk(), "Microsoft.NET.Sdk");
        assert_eq!(d.target_framework(), "net6.0");
        assert!(!d.has_hashbang());
    }
}
