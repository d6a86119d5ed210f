//! Inspect command implementation
//!
//! Reports the store's loading mode and which wildcards are materialized.
//! With `--text`, the prompt is expanded first so lazy loading is visible.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;
use wildprompt_core::LoadMode;

use super::json_output::InspectOutput;
use crate::options::EngineOptions;

/// Run the inspect command
///
/// # Arguments
/// * `options` - Wildcard store flags
/// * `text` - Optional prompt to expand before reporting
/// * `seed` - Seed for that expansion
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(
    options: &EngineOptions,
    text: Option<&str>,
    seed: Option<u64>,
    json_output: bool,
) -> Result<ExitCode> {
    let engine = options.engine()?;

    let expanded = text.map(|text| engine.process(text, seed));

    let config = engine.store().config();
    let output = InspectOutput {
        mode: engine.store().mode(),
        wildcard_dirs: config
            .wildcard_dirs
            .iter()
            .map(|dir| dir.display().to_string())
            .collect(),
        cache_limit_mb: config.cache_limit_mb,
        loaded: engine.list_loaded_keys(),
    };

    if json_output {
        let json =
            serde_json::to_string_pretty(&output).context("Failed to serialize inspect output")?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    let mode = match output.mode {
        LoadMode::Eager => "eager (all wildcards cached)",
        LoadMode::Lazy => "lazy (wildcards loaded on first use)",
    };
    println!("{} {}", "Mode:".cyan().bold(), mode);
    println!(
        "{} {} MB",
        "Cache limit:".cyan().bold(),
        output.cache_limit_mb
    );
    for dir in &output.wildcard_dirs {
        println!("{} {}", "Directory:".cyan().bold(), dir);
    }
    if let Some(expanded) = expanded {
        println!("{} {}", "Expanded:".cyan().bold(), expanded);
    }
    println!(
        "{} {} of {} available",
        "Loaded:".cyan().bold(),
        output.loaded.keys.len(),
        output.loaded.total_available
    );
    for key in &output.loaded.keys {
        println!("  {}", key.dimmed());
    }

    Ok(ExitCode::SUCCESS)
}
