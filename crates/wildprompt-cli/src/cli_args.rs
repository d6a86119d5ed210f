//! CLI argument definitions for the wildprompt command-line interface.
//!
//! All `#[derive(Parser)]`, `#[derive(Subcommand)]` and `#[derive(Args)]`
//! types are defined here, keeping `main.rs` focused on dispatch logic.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use wildprompt_cli::options::EngineOptions;

/// Wildprompt - Wildcard Prompt Expansion
#[derive(Parser)]
#[command(name = "wildprompt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags that configure the wildcard store
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct StoreArgs {
    /// Wildcard directory to scan (repeatable; later directories win)
    #[arg(short, long = "wildcards", value_name = "DIR")]
    pub wildcards: Vec<PathBuf>,

    /// Size limit in MB above which wildcards are loaded on demand
    #[arg(long, value_name = "MB")]
    pub cache_limit_mb: Option<f64>,

    /// JSON config file (wildcard_dirs, cache_limit_mb)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl From<StoreArgs> for EngineOptions {
    fn from(args: StoreArgs) -> Self {
        EngineOptions {
            wildcard_dirs: args.wildcards,
            cache_limit_mb: args.cache_limit_mb,
            config: args.config,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Expand a prompt (from TEXT, --file, or stdin)
    Expand {
        /// Prompt text
        text: Option<String>,

        /// Read the prompt from a file
        #[arg(short, long)]
        file: Option<String>,

        /// Seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of expansions (each gets a seed derived from --seed)
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Also report LoRA tags and BREAK segments
        #[arg(long)]
        loras: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// List every available wildcard as __key__
    List {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// Show the loading mode and which wildcards are loaded
    Inspect {
        /// Expand this prompt first to show on-demand loading
        #[arg(short, long)]
        text: Option<String>,

        /// Seed for the --text expansion
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        store: StoreArgs,
    },
}
