//! Expansion orchestrator.
//!
//! [`WildcardEngine::process`] strips comments once, then runs passes until
//! the text stops changing. Each pass rewrites quantifiers, expands option
//! blocks, then expands wildcard references; because a wildcard may expand
//! into new blocks (and vice versa) the passes repeat. Cycles are cut off by
//! [`MAX_PASSES`], self-multiplying wildcards by [`MAX_TEXT_BYTES`], and the
//! partially expanded text is returned.

mod expander;


use serde::Serialize;
use tracing::debug;

use crate::comment::strip_comments;
use crate::grammar::expand_quantifiers_within;
use crate::key::render_key;
use crate::rng::{create_rng, derive_batch_seed};
use crate::store::{LoadMode, StoreConfig, WildcardStore};

use expander::Expander;

/// Maximum number of expansion passes per call.
pub const MAX_PASSES: usize = 100;

/// Expansion never grows the text past this many bytes (or past the input's
/// own length, if that is larger). Expansions that would overflow are left
/// unexpanded and the call returns.
pub const MAX_TEXT_BYTES: usize = 1 << 20;

/// Snapshot of what the store has materialized so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedKeys {
    /// Loaded keys rendered as `__key__`, sorted.
    pub keys: Vec<String>,
    pub lazy_mode: bool,
    pub total_available: usize,
}

/// Expands prompt text against a [`WildcardStore`].
#[derive(Debug)]
pub struct WildcardEngine {
    store: WildcardStore,
}

impl WildcardEngine {
    /// Wraps an existing store.
    pub fn new(store: WildcardStore) -> Self {
        Self { store }
    }

    /// Builds the store from `config` and wraps it.
    pub fn from_config(config: StoreConfig) -> Self {
        Self::new(WildcardStore::new(config))
    }

    /// The store wildcards are resolved against.
    pub fn store(&self) -> &WildcardStore {
        &self.store
    }

    /// Expands `text`.
    ///
    /// With `Some(seed)` the output is a pure function of the text, the seed
    /// and the wildcard files. Never fails: malformed syntax and unknown
    /// wildcards are left in the output as written.
    pub fn process(&self, text: &str, seed: Option<u64>) -> String {
        let mut rng = create_rng(seed);
        let mut current = strip_comments(text);
        let max_bytes = MAX_TEXT_BYTES.max(current.len());
        let mut expander = Expander::new(&self.store, &mut rng, max_bytes);

        for pass in 0..MAX_PASSES {
            let quantified = expand_quantifiers_within(&current, max_bytes);
            let options = expander.expand_options(&quantified);
            let next = expander.expand_wildcards(&options);

            if next == current {
                return next;
            }
            if expander.hit_limit() {
                debug!(pass, bytes = next.len(), "expansion stopped at the size ceiling");
                return next;
            }
            current = next;
        }

        debug!(passes = MAX_PASSES, "expansion stopped at the pass ceiling");
        current
    }

    /// Expands `text` `count` times.
    ///
    /// Item `i` uses the seed derived from `(seed, i)`, so a batch is
    /// reproducible and its items are independent.
    pub fn process_batch(&self, text: &str, seed: Option<u64>, count: usize) -> Vec<String> {
        (0..count as u64)
            .map(|index| {
                let item_seed = seed.map(|base| derive_batch_seed(base, index));
                self.process(text, item_seed)
            })
            .collect()
    }

    /// Every resolvable key, rendered as `__key__`.
    pub fn list_available_keys(&self) -> Vec<String> {
        self.store
            .available_keys()
            .iter()
            .map(|key| render_key(key))
            .collect()
    }

    /// Keys materialized so far, with the loading mode and available total.
    pub fn list_loaded_keys(&self) -> LoadedKeys {
        LoadedKeys {
            keys: self
                .store
                .loaded_keys()
                .iter()
                .map(|key| render_key(key))
                .collect(),
            lazy_mode: self.store.mode() == LoadMode::Lazy,
            total_available: self.store.total_available(),
        }
    }

    /// Drops every cache and re-scans the wildcard directories.
    pub fn refresh(&self) {
        self.store.refresh();
    }
}
