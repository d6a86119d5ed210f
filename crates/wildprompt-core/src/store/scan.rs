//! Directory scanning and size measurement.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::key::normalize_key;

/// Backing format of a wildcard file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WildcardFileKind {
    /// `.txt`: one option per line, keyed by its path.
    Txt,
    /// `.yaml`/`.yml`: a nested mapping, keyed by its contents.
    Yaml,
}

impl WildcardFileKind {
    /// Classifies a path by extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("txt") {
            Some(WildcardFileKind::Txt)
        } else if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") {
            Some(WildcardFileKind::Yaml)
        } else {
            None
        }
    }
}

/// A wildcard file found under a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildcardFile {
    /// Key derived from the path relative to the root, without extension.
    pub key: String,
    pub path: PathBuf,
    pub kind: WildcardFileKind,
}

fn walk(root: &Path) -> impl Iterator<Item = walkdir::DirEntry> {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(error = %err, "skipping unreadable wildcard path");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
}

/// Lists every `.txt`/`.yaml`/`.yml` file under `root`, sorted by path.
pub fn scan_wildcard_files(root: &Path) -> Vec<WildcardFile> {
    walk(root)
        .filter_map(|entry| {
            let path = entry.path();
            let kind = WildcardFileKind::from_path(path)?;
            let key = key_for_path(root, path)?;
            Some(WildcardFile {
                key,
                path: path.to_path_buf(),
                kind,
            })
        })
        .collect()
}

/// Key for a file: its path relative to `root`, extension dropped, normalized.
pub fn key_for_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let stem = relative.file_stem()?;
    let without_ext = match relative.parent() {
        Some(parent) => parent.join(stem),
        None => PathBuf::from(stem),
    };
    Some(normalize_key(&without_ext.to_string_lossy()))
}

/// Sums the size of wildcard files under `roots`.
///
/// Stops as soon as the running total reaches `limit`, so the result is only
/// exact when it is below `limit`.
pub fn measure_wildcard_bytes(roots: &[PathBuf], limit: u64) -> u64 {
    let mut total = 0u64;
    for root in roots {
        for entry in walk(root) {
            if total >= limit {
                return total;
            }
            if WildcardFileKind::from_path(entry.path()).is_none() {
                continue;
            }
            match entry.metadata() {
                Ok(metadata) => total = total.saturating_add(metadata.len()),
                Err(err) => warn!(path = %entry.path().display(), error = %err, "cannot stat wildcard file"),
            }
        }
    }
    total
}
