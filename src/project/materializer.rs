//! Incremental workspace materialization

use crate::cache::{fingerprint_sampled, CacheRecord, Fingerprint, Workspace};
use crate::error::{SprintError, SprintResult};
use crate::parser::ProjectDescriptor;
use crate::project::manifest;
use tokio::fs;
use tracing::{debug, warn};

/// Default number of source bytes covered by the fingerprint
pub const DEFAULT_SAMPLE_LIMIT: usize = 1024 * 1024;

/// Result of a materialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Materialized {
    /// The cache record matched; nothing was written
    UpToDate(Fingerprint),
    /// Source copy, project file and cache record were (re)written
    Regenerated(Fingerprint),
}

impl Materialized {
    /// Whether anything was written
    pub fn is_regenerated(&self) -> bool {
        matches!(self, Self::Regenerated(_))
    }

    /// Fingerprint of the materialized source
    pub fn fingerprint(&self) -> &Fingerprint {
        match self {
            Self::UpToDate(fp) | Self::Regenerated(fp) => fp,
        }
    }
}

/// Writes workspaces, skipping the work when the source is unchanged
#[derive(Debug, Clone)]
pub struct Materializer {
    sample_limit: usize,
}

impl Materializer {
    /// Create a materializer fingerprinting at most `sample_limit` bytes
    pub fn new(sample_limit: usize) -> Self {
        Self { sample_limit }
    }

    /// Bring `workspace` in line with the given source content
    ///
    /// `source` must be the bytes `descriptor` was parsed from. The cache
    /// record is removed first and written last, so an interrupted run is
    /// never mistaken for an up-to-date one.
    pub async fn materialize(
        &self,
        workspace: &Workspace,
        source: &[u8],
        descriptor: &ProjectDescriptor,
    ) -> SprintResult<Materialized> {
        if source.len() > self.sample_limit {
            warn!(
                "{} is larger than {} bytes; only the first {} bytes are checked for changes",
                workspace.file_name(),
                self.sample_limit,
                self.sample_limit
            );
        }
        let fingerprint = fingerprint_sampled(source, self.sample_limit);
        let record = CacheRecord::new(workspace.record_file());

        if !workspace.dir().exists() {
            debug!("Creating directory {}", workspace.dir().display());
            fs::create_dir_all(workspace.dir()).await.map_err(|e| {
                SprintError::io(format!("creating workspace {}", workspace.dir().display()), e)
            })?;
        } else {
            debug!("Directory {} already exists", workspace.dir().display());
            if record.load().await?.as_ref() == Some(&fingerprint) {
                debug!("Fingerprints match, workspace is up to date");
                return Ok(Materialized::UpToDate(fingerprint));
            }
            record.invalidate().await?;
        }

        fs::write(workspace.source_copy(), source).await.map_err(|e| {
            SprintError::io(
                format!("copying source to {}", workspace.source_copy().display()),
                e,
            )
        })?;

        let project = manifest::render(descriptor, workspace.source_copy());
        fs::write(workspace.project_file(), project).await.map_err(|e| {
            SprintError::io(
                format!("writing project file {}", workspace.project_file().display()),
                e,
            )
        })?;

        record.store(&fingerprint).await?;
        debug!("Materialized {} ({})", workspace.dir().display(), fingerprint);
        Ok(Materialized::Regenerated(fingerprint))
    }
}

impl Default for Materializer {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_LIMIT)
    }
}
