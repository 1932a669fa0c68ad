//! Workspace location and layout
//!
//! The workspace directory name is `<dir-hash>_<file name>`, where the
//! hash covers the absolute path of the directory containing the source.
//! Same source path = same workspace, across runs and machines sharing a
//! temp root.

use crate::error::{SprintError, SprintResult};
use crate::parser::Language;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Name of the cache record file inside a workspace
pub const RECORD_FILE: &str = "previous.hash";

/// Number of hash bytes kept in the workspace name
const DIR_HASH_BYTES: usize = 8;

/// Derive the workspace directory name for a source file
pub fn workspace_id(source_dir: &Path, file_name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source_dir.to_string_lossy().as_bytes());
    let digest = hasher.finalize();
    format!("{}_{}", hex::encode(&digest[..DIR_HASH_BYTES]), file_name)
}

/// The on-disk layout materialized for one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    dir: PathBuf,
    source: PathBuf,
    source_dir: PathBuf,
    source_copy: PathBuf,
    project_file: PathBuf,
    record_file: PathBuf,
}

impl Workspace {
    /// Resolve the workspace of an absolute source path under `root`
    pub fn resolve(root: &Path, source: &Path, language: Language) -> SprintResult<Self> {
        let source_dir = source
            .parent()
            .ok_or_else(|| SprintError::NoParentDirectory(source.to_path_buf()))?;
        let file_name = source
            .file_name()
            .ok_or_else(|| SprintError::NoParentDirectory(source.to_path_buf()))?
            .to_string_lossy()
            .into_owned();

        let dir = root.join(workspace_id(source_dir, &file_name));
        Ok(Self {
            source: source.to_path_buf(),
            source_dir: source_dir.to_path_buf(),
            source_copy: dir.join(&file_name),
            project_file: dir.join(language.project_file_name()),
            record_file: dir.join(RECORD_FILE),
            dir,
        })
    }

    /// Workspace directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The original source file
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Directory of the original source file
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Copy of the source inside the workspace
    pub fn source_copy(&self) -> &Path {
        &self.source_copy
    }

    /// Generated project file
    pub fn project_file(&self) -> &Path {
        &self.project_file
    }

    /// Cache record file
    pub fn record_file(&self) -> &Path {
        &self.record_file
    }

    /// File name of the source, as watched and copied
    pub fn file_name(&self) -> &str {
        self.source_copy
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    /// Rewrite workspace paths in tool output to the user's source directory
    pub fn rewrite_paths(&self, text: &str) -> String {
        text.replace(
            self.dir.to_string_lossy().as_ref(),
            self.source_dir.to_string_lossy().as_ref(),
        )
    }
}
