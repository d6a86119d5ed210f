//! JSON output types for machine-readable CLI output.
//!
//! These types back the `--json` flag on `expand`, `list` and `inspect`, so
//! scripts can consume results without scraping colored text.

use serde::Serialize;
use wildprompt_core::{LoadMode, LoadedKeys, LoraTag};

/// JSON output for the `expand` command.
#[derive(Debug, Clone, Serialize)]
pub struct ExpandOutput {
    pub results: Vec<ExpandResult>,
}

/// One expanded prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpandResult {
    /// Position in the batch (0 for a single expansion)
    pub index: usize,
    /// Seed used for this item; absent when seeded from entropy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// The expanded text
    pub text: String,
    /// LoRA tags found in the text (with `--loras`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loras: Option<Vec<LoraTag>>,
    /// BREAK segments of the text with LoRA tags removed (with `--loras`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<String>>,
}

/// JSON output for the `list` command.
#[derive(Debug, Clone, Serialize)]
pub struct ListOutput {
    /// Every resolvable wildcard, rendered as `__key__`
    pub keys: Vec<String>,
    pub total: usize,
}

/// JSON output for the `inspect` command.
#[derive(Debug, Clone, Serialize)]
pub struct InspectOutput {
    pub mode: LoadMode,
    pub wildcard_dirs: Vec<String>,
    pub cache_limit_mb: f64,
    #[serde(flatten)]
    pub loaded: LoadedKeys,
}
