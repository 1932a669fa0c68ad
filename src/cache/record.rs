//! Persisted fingerprint of the last materialized source

use crate::cache::fingerprint::Fingerprint;
use crate::error::{SprintError, SprintResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// The single-line cache record stored in a workspace
#[derive(Debug, Clone)]
pub struct CacheRecord {
    path: PathBuf,
}

impl CacheRecord {
    /// Cache record stored at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Record file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored fingerprint, if there is a valid one
    ///
    /// A record that cannot be understood counts as missing.
    pub async fn load(&self) -> SprintResult<Option<Fingerprint>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(SprintError::io(
                    format!("reading cache record {}", self.path.display()),
                    e,
                ))
            }
        };

        let fingerprint = Fingerprint::parse(&content);
        if fingerprint.is_none() {
            warn!("Ignoring unreadable cache record {}", self.path.display());
        }
        Ok(fingerprint)
    }

    /// Atomically replace the record with `fingerprint`
    pub async fn store(&self, fingerprint: &Fingerprint) -> SprintResult<()> {
        let temp_path = self.path.with_extension("hash.tmp");

        fs::write(&temp_path, fingerprint.as_str())
            .await
            .map_err(|e| SprintError::io(format!("writing {}", temp_path.display()), e))?;

        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            SprintError::io(format!("replacing cache record {}", self.path.display()), e)
        })?;

        debug!("Stored fingerprint {} in {}", fingerprint, self.path.display());
        Ok(())
    }

    /// Remove the record, so the workspace counts as stale
    pub async fn invalidate(&self) -> SprintResult<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SprintError::io(
                format!("removing cache record {}", self.path.display()),
                e,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::fingerprint::fingerprint;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_record_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let record = CacheRecord::new(dir.path().join("previous.hash"));
        assert_eq!(record.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn store_then_load() {
        let dir = TempDir::new().unwrap();
        let record = CacheRecord::new(dir.path().join("previous.hash"));
        let fp = fingerprint(b"class Program {}");

        record.store(&fp).await.unwrap();

        assert_eq!(record.load().await.unwrap(), Some(fp));
        assert!(!dir.path().join("previous.hash.tmp").exists());
    }

    #[tokio::test]
    async fn garbage_record_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("previous.hash");
        std::fs::write(&path, "half-writ").unwrap();

        assert_eq!(CacheRecord::new(&path).load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn invalidate_removes_record_and_tolerates_missing() {
        let dir = TempDir::new().unwrap();
        let record = CacheRecord::new(dir.path().join("previous.hash"));
        record.store(&fingerprint(b"x")).await.unwrap();

        record.invalidate().await.unwrap();
        assert!(!record.path().exists());
        record.invalidate().await.unwrap();
    }
}
