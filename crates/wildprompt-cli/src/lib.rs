//! Wildprompt CLI library.
//!
//! This crate provides the functionality behind the `wildprompt` binary:
//! store configuration from flags and config files, prompt input loading,
//! logging setup, and the `expand`, `list` and `inspect` commands.

pub mod commands;
pub mod input;
pub mod logging;
pub mod options;
