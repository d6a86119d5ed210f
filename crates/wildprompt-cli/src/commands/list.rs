//! List command implementation
//!
//! Prints every available wildcard as `__key__`.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;

use super::json_output::ListOutput;
use crate::options::EngineOptions;

/// Run the list command
pub fn run(options: &EngineOptions, json_output: bool) -> Result<ExitCode> {
    let engine = options.engine()?;
    let keys = engine.list_available_keys();

    if json_output {
        let output = ListOutput {
            total: keys.len(),
            keys,
        };
        let json =
            serde_json::to_string_pretty(&output).context("Failed to serialize list output")?;
        println!("{}", json);
    } else {
        for key in &keys {
            println!("{}", key);
        }
        eprintln!("{}", format!("{} wildcards", keys.len()).dimmed());
    }

    Ok(ExitCode::SUCCESS)
}
