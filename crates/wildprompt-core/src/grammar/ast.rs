//! Syntax tree for parsed prompt text.

use crate::selection::WeightedOption;

/// Separator used by a multi-select block that does not name its own.
pub const DEFAULT_SEPARATOR: &str = ", ";

/// A piece of parsed prompt text.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text, emitted unchanged.
    Text(String),
    /// A `__name__` reference.
    Wildcard(WildcardRef),
    /// A `{...}` option block.
    Block(OptionBlock),
}

impl Node {
    /// The source text this node was parsed from.
    ///
    /// Concatenating the sources of a parsed sequence gives back the input.
    pub fn source(&self) -> &str {
        match self {
            Node::Text(text) => text,
            Node::Wildcard(wildcard) => &wildcard.raw,
            Node::Block(block) => &block.raw,
        }
    }
}

/// A `__name__` wildcard reference.
#[derive(Debug, Clone, PartialEq)]
pub struct WildcardRef {
    /// The reference exactly as written, including the surrounding `__`.
    pub raw: String,
    /// The normalized lookup key.
    pub key: String,
}

/// A `{...}` block of `|`-separated options.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionBlock {
    /// The block exactly as written, including braces.
    pub raw: String,
    /// Multi-select header (`n$$`, `n-m$$`, `-n$$`, optional `sep$$`).
    pub select: Option<MultiSelect>,
    /// Options in source order. Never empty.
    pub options: Vec<BlockOption>,
}

impl OptionBlock {
    /// Selection weights of the options, in source order.
    pub fn weights(&self) -> Vec<f64> {
        self.options.iter().map(|o| o.option.weight()).collect()
    }
}

/// One option inside a block: its weight/text and the text parsed into nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockOption {
    pub option: WeightedOption,
    pub nodes: Vec<Node>,
}

impl BlockOption {
    /// Returns the wildcard references that appear directly in this option.
    pub fn wildcards(&self) -> impl Iterator<Item = &WildcardRef> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Wildcard(wildcard) => Some(wildcard),
            _ => None,
        })
    }
}

/// Multi-select header of an option block.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiSelect {
    pub range: SelectRange,
    pub separator: String,
}

/// How many options a multi-select block picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectRange {
    /// `n$$`: exactly `n`.
    Exact(usize),
    /// `n1-n2$$`: uniformly between `n1` and `n2`, inclusive.
    Between(usize, usize),
    /// `-n$$`: uniformly between 1 and `n`, inclusive.
    UpTo(usize),
}

impl SelectRange {
    /// Inclusive `(low, high)` bounds, clamped to `available` options.
    pub fn bounds(&self, available: usize) -> (usize, usize) {
        let (low, high) = match *self {
            SelectRange::Exact(n) => (n, n),
            SelectRange::Between(a, b) => (a.min(b), a.max(b)),
            SelectRange::UpTo(n) => (1.min(n), n),
        };
        let high = high.min(available);
        (low.min(high), high)
    }
}
