//! Error types for wildcard loading and configuration.
//!
//! None of these ever escape [`WildcardEngine::process`](crate::WildcardEngine::process):
//! the store logs them and treats the affected key as unresolvable.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading wildcard files from disk.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read wildcard file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse YAML wildcard file '{}': {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("YAML wildcard file '{}' must contain a mapping at the top level", .path.display())]
    YamlShape { path: PathBuf },
}

impl StoreError {
    /// Returns the stable error code string (e.g., "WILDCARD_STORE_001").
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Read { .. } => "WILDCARD_STORE_001",
            StoreError::Yaml { .. } => "WILDCARD_STORE_002",
            StoreError::YamlShape { .. } => "WILDCARD_STORE_003",
        }
    }
}

/// Errors raised while loading a [`StoreConfig`](crate::StoreConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid cache_limit_mb {0}: must be a finite, non-negative number")]
    InvalidCacheLimit(f64),
}

impl ConfigError {
    /// Returns the stable error code string (e.g., "WILDCARD_CONFIG_001").
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "WILDCARD_CONFIG_001",
            ConfigError::Parse(_) => "WILDCARD_CONFIG_002",
            ConfigError::InvalidCacheLimit(_) => "WILDCARD_CONFIG_003",
        }
    }
}
