//! Store configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default eager/lazy threshold in MiB.
pub const DEFAULT_CACHE_LIMIT_MB: f64 = 50.0;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// How wildcard files are brought into memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadMode {
    /// Every file is read at refresh time.
    Eager,
    /// Flat files are indexed by path and read on first use. YAML documents
    /// are still read at refresh time.
    Lazy,
}

/// Configuration consumed by [`WildcardStore`](super::WildcardStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Roots scanned in order. Later roots override earlier ones on key clashes.
    pub wildcard_dirs: Vec<PathBuf>,
    /// Total wildcard size (MiB) at or above which the store loads lazily.
    pub cache_limit_mb: f64,
    /// Skips the size measurement and uses this mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_mode: Option<LoadMode>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            wildcard_dirs: Vec::new(),
            cache_limit_mb: DEFAULT_CACHE_LIMIT_MB,
            force_mode: None,
        }
    }
}

impl StoreConfig {
    /// Creates a config scanning the given roots with default limits.
    pub fn with_dirs<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            wildcard_dirs: dirs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: StoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Checks that the cache limit is a finite, non-negative number.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.cache_limit_mb.is_finite() || self.cache_limit_mb < 0.0 {
            return Err(ConfigError::InvalidCacheLimit(self.cache_limit_mb));
        }
        Ok(())
    }

    /// The cache limit in bytes.
    pub fn cache_limit_bytes(&self) -> u64 {
        (self.cache_limit_mb.max(0.0) * BYTES_PER_MB) as u64
    }
}
