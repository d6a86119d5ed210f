//! Wildprompt Core Library
//!
//! This crate expands randomized text prompts written in a small template
//! grammar. A prompt may contain:
//!
//! - **Option blocks**: `{red|green|blue}` picks one option; `{10::common|1::rare}`
//!   weights the choice; `{2$$, $$a|b|c}` picks two distinct options joined by `, `.
//! - **Wildcards**: `__color__` is replaced by a random line from a file-backed
//!   option list (`color.txt`, or a leaf list inside a YAML document).
//! - **Quantifiers**: `3#__color__` repeats a wildcard reference three times as
//!   `|`-separated options, so `{2$$3#__color__}` picks two of three independent rolls.
//! - **Comments**: `# ...` to end of line is removed before expansion.
//!
//! Expansion runs passes until the text stops changing (or a pass ceiling is
//! reached), so wildcards may expand into further blocks and wildcards.
//!
//! # Example
//!
//! ```
//! use wildprompt_core::{StoreConfig, WildcardEngine};
//!
//! let engine = WildcardEngine::from_config(StoreConfig::default());
//!
//! let a = engine.process("a {red|green|blue} flower", Some(42));
//! let b = engine.process("a {red|green|blue} flower", Some(42));
//! assert_eq!(a, b);
//! assert!(a.starts_with("a ") && a.ends_with(" flower"));
//! ```
//!
//! # Modules
//!
//! - [`comment`]: Comment stripping
//! - [`grammar`]: Recursive-descent parser for blocks, wildcards, and quantifiers
//! - [`selection`]: Weighted sampling without replacement
//! - [`store`]: Wildcard store with eager and lazy loading
//! - [`engine`]: The expansion orchestrator
//! - [`postprocess`]: LoRA tag and BREAK segment utilities
//! - [`rng`]: Seeded RNG construction and seed derivation

pub mod comment;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod key;
pub mod postprocess;
pub mod rng;
pub mod selection;
pub mod store;

// Re-export commonly used types at the crate root
pub use comment::strip_comments;
pub use engine::{LoadedKeys, WildcardEngine, MAX_PASSES, MAX_TEXT_BYTES};
pub use error::{ConfigError, StoreError};
pub use key::{normalize_key, render_key};
pub use postprocess::{extract_lora_tags, split_break_segments, strip_lora_tags, LoraTag};
pub use rng::{create_rng, derive_batch_seed};
pub use selection::{choose, choose_indices, WeightedOption};
pub use store::{LoadMode, OptionList, StoreConfig, WildcardStore};
