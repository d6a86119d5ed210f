//! Wildprompt CLI - Command-line interface for wildcard prompt expansion
//!
//! This binary expands prompts against a directory of wildcard files and
//! reports on the wildcard store.

mod cli_args;

use clap::Parser;
use std::process::ExitCode;

use cli_args::{Cli, Commands};
use wildprompt_cli::{commands, logging};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Expand {
            text,
            file,
            seed,
            count,
            loras,
            json,
            store,
        } => commands::expand::run(
            &store.into(),
            text.as_deref(),
            file.as_deref(),
            seed,
            count,
            loras,
            json,
        ),
        Commands::List { json, store } => commands::list::run(&store.into(), json),
        Commands::Inspect {
            text,
            seed,
            json,
            store,
        } => commands::inspect::run(&store.into(), text.as_deref(), seed, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
