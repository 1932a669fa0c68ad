//! Configuration schema for Sprint
//!
//! Configuration is stored at `~/.config/sprint/config.toml`

use crate::project::DEFAULT_SAMPLE_LIMIT;
use crate::watch::DEBOUNCE_MS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Workspace cache settings
    pub cache: CacheConfig,

    /// Watch mode settings
    pub watch: WatchConfig,

    /// External toolchain settings
    pub toolchain: ToolchainConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Workspace cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding the workspaces (defaults to the system temp dir)
    pub root: Option<PathBuf>,

    /// Number of leading source bytes covered by the change fingerprint.
    /// Edits past this point do not trigger regeneration.
    pub sample_limit: usize,
}

impl CacheConfig {
    /// Resolved workspace root
    pub fn root(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            root: None,
            sample_limit: DEFAULT_SAMPLE_LIMIT,
        }
    }
}

/// Watch mode configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Quiet period in milliseconds before a burst of changes is synced
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
        }
    }
}

/// External toolchain configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Program used for restore, build, run and watch
    pub program: String,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            program: "dotnet".to_string(),
        }
    }
}
