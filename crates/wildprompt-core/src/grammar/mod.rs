//! Prompt grammar: option blocks, wildcard references, and quantifiers.
//!
//! Text is parsed into a flat sequence of [`Node`]s by a small
//! recursive-descent parser. Option blocks are split on `|` only at their own
//! nesting depth, and each option's text is parsed again into child nodes, so
//! `{a|{b|c}}` has two options, the second holding a nested block.
//!
//! Malformed input never fails to parse: an unterminated `{` or a stray `}`
//! is kept as literal text.
//!
//! Quantifiers (`3#__name__`) are a textual rewrite applied before parsing;
//! see [`expand_quantifiers`].

mod ast;
mod parser;
mod quantifier;

pub use ast::{
    BlockOption, MultiSelect, Node, OptionBlock, SelectRange, WildcardRef, DEFAULT_SEPARATOR,
};
pub use parser::{parse, MAX_NESTING_DEPTH};
pub use quantifier::{expand_quantifiers, expand_quantifiers_within, MAX_QUANTIFIER};
