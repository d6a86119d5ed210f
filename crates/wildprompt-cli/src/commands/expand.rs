//! Expand command implementation
//!
//! Expands a prompt once, or `--count` times with per-item derived seeds.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;
use tracing::debug;
use wildprompt_core::{
    derive_batch_seed, extract_lora_tags, split_break_segments, strip_lora_tags, WildcardEngine,
};

use super::json_output::{ExpandOutput, ExpandResult};
use crate::input::read_prompt;
use crate::options::EngineOptions;

/// Run the expand command
///
/// # Arguments
/// * `options` - Wildcard store flags
/// * `text` - Prompt text (falls back to `file`, then stdin)
/// * `file` - Path to a prompt file
/// * `seed` - Base seed; `None` for non-reproducible output
/// * `count` - Number of expansions
/// * `loras` - Whether to report LoRA tags and BREAK segments
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(
    options: &EngineOptions,
    text: Option<&str>,
    file: Option<&str>,
    seed: Option<u64>,
    count: usize,
    loras: bool,
    json_output: bool,
) -> Result<ExitCode> {
    let prompt = read_prompt(text, file)?;
    let engine = options.engine()?;
    debug!(count, ?seed, "expanding prompt");

    let results = expand_all(&engine, &prompt, seed, count, loras);

    if json_output {
        let output = ExpandOutput { results };
        let json =
            serde_json::to_string_pretty(&output).context("Failed to serialize expand output")?;
        println!("{}", json);
    } else {
        print_human(&results);
    }

    Ok(ExitCode::SUCCESS)
}

/// Seeds used for each item: the base seed itself for a single expansion,
/// derived per-item seeds for a batch.
pub fn item_seeds(seed: Option<u64>, count: usize) -> Vec<Option<u64>> {
    if count <= 1 {
        return vec![seed];
    }
    (0..count as u64)
        .map(|index| seed.map(|base| derive_batch_seed(base, index)))
        .collect()
}

/// Expands `prompt` `count` times (at least once).
pub fn expand_all(
    engine: &WildcardEngine,
    prompt: &str,
    seed: Option<u64>,
    count: usize,
    loras: bool,
) -> Vec<ExpandResult> {
    let count = count.max(1);
    let texts = if count == 1 {
        vec![engine.process(prompt, seed)]
    } else {
        engine.process_batch(prompt, seed, count)
    };

    texts
        .into_iter()
        .zip(item_seeds(seed, count))
        .enumerate()
        .map(|(index, (text, seed))| ExpandResult {
            index,
            seed,
            loras: loras.then(|| extract_lora_tags(&text)),
            segments: loras.then(|| split_break_segments(&strip_lora_tags(&text))),
            text,
        })
        .collect()
}

fn print_human(results: &[ExpandResult]) {
    for result in results {
        println!("{}", result.text);

        if let Some(tags) = &result.loras {
            for tag in tags {
                println!(
                    "  {} {} (model {}, clip {})",
                    "lora:".cyan().bold(),
                    tag.name,
                    tag.model_weight,
                    tag.clip_weight
                );
            }
        }
        if let Some(segments) = &result.segments {
            for (i, segment) in segments.iter().enumerate() {
                println!("  {} [{}]", format!("segment {}:", i + 1).dimmed(), segment);
            }
        }
    }
}
