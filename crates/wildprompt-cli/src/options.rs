//! Store configuration from CLI flags and config files.

use anyhow::{Context, Result};
use std::path::PathBuf;
use wildprompt_core::{StoreConfig, WildcardEngine};

/// Flags shared by every command that needs a wildcard store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineOptions {
    /// `--wildcards DIR`, in order. Replaces the config file's directories.
    pub wildcard_dirs: Vec<PathBuf>,
    /// `--cache-limit-mb MB`. Replaces the config file's limit.
    pub cache_limit_mb: Option<f64>,
    /// `--config PATH`: JSON [`StoreConfig`].
    pub config: Option<PathBuf>,
}

impl EngineOptions {
    /// Builds the store configuration: config file first, then flag overrides.
    pub fn store_config(&self) -> Result<StoreConfig> {
        let mut config = match &self.config {
            Some(path) => StoreConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => StoreConfig::default(),
        };

        if !self.wildcard_dirs.is_empty() {
            config.wildcard_dirs = self.wildcard_dirs.clone();
        }
        if let Some(limit) = self.cache_limit_mb {
            config.cache_limit_mb = limit;
        }
        config.validate().context("Invalid --cache-limit-mb")?;

        Ok(config)
    }

    /// Builds the engine, scanning the configured directories.
    pub fn engine(&self) -> Result<WildcardEngine> {
        Ok(WildcardEngine::from_config(self.store_config()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_defaults_without_flags() {
        let config = EngineOptions::default().store_config().unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wildprompt.json");
        fs::write(
            &path,
            r#"{"wildcard_dirs": ["from-file"], "cache_limit_mb": 10}"#,
        )
        .unwrap();

        let options = EngineOptions {
            wildcard_dirs: vec![PathBuf::from("from-flag")],
            cache_limit_mb: None,
            config: Some(path),
        };
        let config = options.store_config().unwrap();
        assert_eq!(config.wildcard_dirs, vec![PathBuf::from("from-flag")]);
        assert_eq!(config.cache_limit_mb, 10.0);
    }

    #[test]
    fn test_rejects_negative_limit_flag() {
        let options = EngineOptions {
            cache_limit_mb: Some(-5.0),
            ..EngineOptions::default()
        };
        assert!(options.store_config().is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let options = EngineOptions {
            config: Some(PathBuf::from("/no/such/wildprompt.json")),
            ..EngineOptions::default()
        };
        let err = options.store_config().unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
