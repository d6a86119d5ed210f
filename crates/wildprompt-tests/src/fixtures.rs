//! Test fixture utilities for creating wildcard directory trees.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wildprompt_core::{LoadMode, StoreConfig, WildcardEngine, WildcardStore};

/// A temporary wildcard directory.
pub struct WildcardTreeFixture {
    pub root: TempDir,
}

impl Default for WildcardTreeFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl WildcardTreeFixture {
    /// Create a new empty wildcard directory.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        Self { root }
    }

    /// Create a directory with a small, varied wildcard set.
    ///
    /// Contains flat files at several depths, a YAML document, a comment-laden
    /// file and weighted lines.
    pub fn sample() -> Self {
        let fixture = Self::new();
        fixture.add_txt("color", &["red", "green", "blue"]);
        fixture.add_txt("fantasy/dragon", &["wyvern", "drake"]);
        fixture.add_txt("dragon/fire", &["ember", "inferno"]);
        fixture.add_txt("samples/flower", &["rose", "lily", "tulip", "orchid"]);
        fixture.add_txt("rarity", &["10::common", "1::rare"]);
        fixture.add_file(
            "notes/commented.txt",
            "# heading\n\nkept one\n   # indented comment\nkept two\n",
        );
        fixture.add_file(
            "creatures.yaml",
            "beasts:\n  land: [wolf, bear]\n  sea:\n    - shark\n    - squid\n",
        );
        fixture
    }

    /// Get the wildcard root path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Write a file at `relative`, creating parent directories.
    pub fn add_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create wildcard dir");
        }
        fs::write(&path, content).expect("Failed to write wildcard file");
        path
    }

    /// Write `<key>.txt` with one option per line.
    pub fn add_txt(&self, key: &str, lines: &[&str]) -> PathBuf {
        let mut content = lines.join("\n");
        content.push('\n');
        self.add_file(&format!("{}.txt", key), &content)
    }

    /// Store configuration scanning this directory.
    pub fn config(&self) -> StoreConfig {
        StoreConfig::with_dirs([self.path()])
    }

    /// Store configuration with the loading mode forced.
    pub fn config_with_mode(&self, mode: LoadMode) -> StoreConfig {
        StoreConfig {
            force_mode: Some(mode),
            ..self.config()
        }
    }

    /// A store over this directory in the given mode.
    pub fn store(&self, mode: LoadMode) -> WildcardStore {
        WildcardStore::new(self.config_with_mode(mode))
    }

    /// An engine over this directory in the given mode.
    pub fn engine(&self, mode: LoadMode) -> WildcardEngine {
        WildcardEngine::new(self.store(mode))
    }
}
