//! CLI command implementations

pub mod expand;
pub mod inspect;
pub mod json_output;
pub mod list;
