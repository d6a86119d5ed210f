//! Wildcard store: resolves keys to option lists.
//!
//! The store scans its roots on construction and on every [`refresh`]. When
//! the wildcard files are smaller than the configured limit everything is
//! read up front ([`LoadMode::Eager`]); otherwise flat files are only indexed
//! by path and read on first use ([`LoadMode::Lazy`]). YAML documents are
//! always read up front because their keys live inside the file.
//!
//! Lookups that miss every exact key fall back to depth-agnostic matching:
//! `dragon` pools every list whose key has `dragon` as a path segment run
//! (`fantasy/dragon`, `dragon/fire`, ...). Pooled results are cached under the
//! requested key.
//!
//! All state sits behind one mutex, so a lookup never observes a
//! half-finished refresh.
//!
//! [`refresh`]: WildcardStore::refresh

pub mod config;
pub mod loader;
pub mod scan;

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::key::{matches_depth_agnostic, matches_glob, normalize_key};

pub use config::{LoadMode, StoreConfig, DEFAULT_CACHE_LIMIT_MB};
pub use loader::{load_txt_file, load_yaml_file, parse_txt_options, parse_yaml_wildcards};
pub use scan::{measure_wildcard_bytes, scan_wildcard_files, WildcardFile, WildcardFileKind};

/// An immutable, cheaply cloned list of options.
pub type OptionList = Arc<[String]>;

/// Resolves wildcard keys against one or more directories of wildcard files.
#[derive(Debug)]
pub struct WildcardStore {
    config: StoreConfig,
    state: Mutex<StoreState>,
}

#[derive(Debug)]
struct StoreState {
    mode: LoadMode,
    /// Materialized lists, keyed by their own key.
    loaded: BTreeMap<String, OptionList>,
    /// Lazy mode: flat files indexed but not yet read.
    available: BTreeMap<String, PathBuf>,
    /// Depth-agnostic fallback results, keyed by the requested name.
    pooled: BTreeMap<String, OptionList>,
}

impl StoreState {
    fn new(mode: LoadMode) -> Self {
        Self {
            mode,
            loaded: BTreeMap::new(),
            available: BTreeMap::new(),
            pooled: BTreeMap::new(),
        }
    }

    /// Keys backed by a file, whether read yet or not.
    fn known_keys(&self) -> BTreeSet<&str> {
        self.loaded
            .keys()
            .chain(self.available.keys())
            .map(String::as_str)
            .collect()
    }
}

impl WildcardStore {
    /// Creates a store and performs the initial scan.
    pub fn new(config: StoreConfig) -> Self {
        let state = build_state(&config);
        Self {
            config,
            state: Mutex::new(state),
        }
    }

    /// The configuration this store was built from.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Drops every cached list and re-scans the roots, re-deciding the mode.
    pub fn refresh(&self) {
        let mut state = self.lock();
        *state = build_state(&self.config);
    }

    /// The loading mode chosen by the last scan.
    pub fn mode(&self) -> LoadMode {
        self.lock().mode
    }

    /// Resolves a key (or a `*` glob) to its options.
    ///
    /// A key whose backing file cannot be read is treated like a missing key:
    /// the depth-agnostic fallback still applies. Returns `None` when nothing
    /// matches.
    pub fn resolve(&self, key: &str) -> Option<OptionList> {
        let key = normalize_key(key);
        let mut state = self.lock();
        if key.contains('*') {
            return resolve_glob(&mut state, &key);
        }
        if let Some(Some(list)) = resolve_exact(&mut state, &key) {
            return Some(list);
        }
        if let Some(list) = state.pooled.get(&key) {
            return Some(list.clone());
        }
        resolve_fallback(&mut state, &key)
    }

    /// Every key that can be resolved exactly, sorted.
    pub fn available_keys(&self) -> Vec<String> {
        self.lock()
            .known_keys()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Keys materialized so far, including cached fallback pools, sorted.
    pub fn loaded_keys(&self) -> Vec<String> {
        let state = self.lock();
        state
            .loaded
            .keys()
            .chain(state.pooled.keys())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of keys that can be resolved exactly.
    pub fn total_available(&self) -> usize {
        self.lock().known_keys().len()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Exact lookup. `Some(None)` means the key exists but its file failed to load.
fn resolve_exact(state: &mut StoreState, key: &str) -> Option<Option<OptionList>> {
    if let Some(list) = state.loaded.get(key) {
        return Some(Some(list.clone()));
    }
    let path = state.available.get(key)?.clone();
    Some(load_on_demand(state, key, &path))
}

fn load_on_demand(state: &mut StoreState, key: &str, path: &Path) -> Option<OptionList> {
    match load_txt_file(path) {
        Ok(options) => {
            debug!(key, options = options.len(), "loaded wildcard on demand");
            let list: OptionList = options.into();
            state.loaded.insert(key.to_string(), list.clone());
            Some(list)
        }
        Err(err) => {
            warn!(key, code = err.code(), "{}", err);
            None
        }
    }
}

/// Concatenates the lists of every known key accepted by `accept`.
///
/// Returns the matched keys alongside the pooled options.
fn pool_matching(
    state: &mut StoreState,
    accept: impl Fn(&str) -> bool,
) -> (Vec<String>, Vec<String>) {
    let matched: Vec<String> = state
        .known_keys()
        .into_iter()
        .filter(|candidate| accept(*candidate))
        .map(str::to_string)
        .collect();

    let mut pool = Vec::new();
    for candidate in &matched {
        if let Some(Some(list)) = resolve_exact(state, candidate) {
            pool.extend(list.iter().cloned());
        }
    }
    (matched, pool)
}

fn resolve_fallback(state: &mut StoreState, key: &str) -> Option<OptionList> {
    let (matched, pool) = pool_matching(state, |candidate| matches_depth_agnostic(candidate, key));
    if pool.is_empty() {
        return None;
    }
    info!(
        "Wildcard '{}' resolved via depth-agnostic matching to {} keys: {:?}",
        key,
        matched.len(),
        matched
    );
    let list: OptionList = pool.into();
    state.pooled.insert(key.to_string(), list.clone());
    Some(list)
}

fn resolve_glob(state: &mut StoreState, pattern: &str) -> Option<OptionList> {
    let (matched, pool) = pool_matching(state, |candidate| matches_glob(pattern, candidate));
    debug!(
        pattern,
        matched = matched.len(),
        options = pool.len(),
        "resolved wildcard glob"
    );
    if pool.is_empty() {
        None
    } else {
        Some(pool.into())
    }
}

fn build_state(config: &StoreConfig) -> StoreState {
    let mode = config.force_mode.unwrap_or_else(|| detect_mode(config));
    let mut state = StoreState::new(mode);

    let mut files = Vec::new();
    for root in &config.wildcard_dirs {
        if !root.is_dir() {
            warn!(root = %root.display(), "wildcard directory does not exist");
            continue;
        }
        files.extend(scan_wildcard_files(root));
    }

    // Flat files first, so a YAML leaf with the same key wins in both modes.
    for file in files.iter().filter(|f| f.kind == WildcardFileKind::Txt) {
        match mode {
            LoadMode::Lazy => {
                state.available.insert(file.key.clone(), file.path.clone());
            }
            LoadMode::Eager => match load_txt_file(&file.path) {
                Ok(options) => {
                    state.loaded.insert(file.key.clone(), options.into());
                }
                Err(err) => warn!(key = %file.key, code = err.code(), "{}", err),
            },
        }
    }
    for file in files.iter().filter(|f| f.kind == WildcardFileKind::Yaml) {
        match load_yaml_file(&file.path) {
            Ok(lists) => {
                for (key, options) in lists {
                    state.loaded.insert(key, options.into());
                }
            }
            Err(err) => warn!(code = err.code(), "{}", err),
        }
    }

    info!(
        ?mode,
        loaded = state.loaded.len(),
        indexed = state.available.len(),
        "wildcard store ready"
    );
    state
}

/// Eager below the size limit, lazy at or above it.
fn detect_mode(config: &StoreConfig) -> LoadMode {
    let limit = config.cache_limit_bytes();
    let size = measure_wildcard_bytes(&config.wildcard_dirs, limit);
    let mode = if size >= limit {
        LoadMode::Lazy
    } else {
        LoadMode::Eager
    };
    info!(
        size_bytes = size,
        limit_bytes = limit,
        ?mode,
        "selected wildcard loading mode"
    );
    mode
}
