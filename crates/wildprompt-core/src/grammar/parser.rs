//! Recursive-descent parser for prompt text.

use std::sync::OnceLock;

use regex::Regex;

use super::ast::{
    BlockOption, MultiSelect, Node, OptionBlock, SelectRange, WildcardRef, DEFAULT_SEPARATOR,
};
use crate::key::{is_name_char, normalize_key};
use crate::selection::WeightedOption;

/// Blocks nested deeper than this are kept as literal text.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Header of a multi-select block: `n`, `n-m`, or `-n` before the first `$$`.
const SELECT_HEADER_PATTERN: &str = r"^\s*(?:(\d+)\s*(?:-\s*(\d+))?|-\s*(\d+))\s*$";

static SELECT_HEADER_REGEX: OnceLock<Regex> = OnceLock::new();

fn select_header_regex() -> &'static Regex {
    SELECT_HEADER_REGEX
        .get_or_init(|| Regex::new(SELECT_HEADER_PATTERN).expect("invalid regex pattern"))
}

/// Parses prompt text into nodes. Never fails; malformed syntax stays literal.
pub fn parse(text: &str) -> Vec<Node> {
    parse_at_depth(text, 0)
}

fn parse_at_depth(src: &str, depth: usize) -> Vec<Node> {
    let bytes = src.as_bytes();
    let closers = match_braces(bytes);
    let mut nodes = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    // Every index we slice at is an ASCII delimiter, so it is a char boundary.
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if is_escaped_brace(bytes, i) => i += 2,
            b'{' => match closers[i] {
                Some(end) => {
                    push_text(&mut nodes, &src[text_start..i]);
                    nodes.push(parse_block(&src[i..=end], depth));
                    i = end + 1;
                    text_start = i;
                }
                None => i += 1,
            },
            b'_' if bytes.get(i + 1) == Some(&b'_') => match scan_wildcard(src, i) {
                Some(end) => {
                    push_text(&mut nodes, &src[text_start..i]);
                    let raw = &src[i..end];
                    nodes.push(Node::Wildcard(WildcardRef {
                        raw: raw.to_string(),
                        key: normalize_key(&raw[2..raw.len() - 2]),
                    }));
                    i = end;
                    text_start = i;
                }
                None => i += 1,
            },
            _ => i += 1,
        }
    }

    push_text(&mut nodes, &src[text_start..]);
    nodes
}

fn is_escaped_brace(bytes: &[u8], i: usize) -> bool {
    matches!(bytes.get(i + 1), Some(b'{') | Some(b'}'))
}

/// Pairs every `{` with its matching `}` in one pass.
///
/// `closers[i]` is the index of the `}` closing the `{` at `i`, or `None` when
/// that brace is unterminated. Unmatched `}` are ignored.
fn match_braces(bytes: &[u8]) -> Vec<Option<usize>> {
    let mut closers = vec![None; bytes.len()];
    let mut open = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if is_escaped_brace(bytes, i) => {
                i += 2;
                continue;
            }
            b'{' => open.push(i),
            b'}' => {
                if let Some(start) = open.pop() {
                    closers[start] = Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    closers
}

/// Scans a `__name__` reference starting at `start` (which points at `__`).
///
/// The name is matched non-greedily: the first `__` after at least one name
/// character closes the reference. Returns the index just past the closing
/// `__`.
fn scan_wildcard(src: &str, start: usize) -> Option<usize> {
    let name_start = start + 2;
    let rest = &src[name_start..];
    for (offset, c) in rest.char_indices() {
        if offset > 0 && rest[offset..].starts_with("__") {
            return Some(name_start + offset + 2);
        }
        if !is_name_char(c) {
            return None;
        }
    }
    None
}

/// Splits block contents on `|` at nesting depth zero.
fn split_top_level(inner: &str) -> Vec<&str> {
    let bytes = inner.as_bytes();
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut segment_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if is_escaped_brace(bytes, i) => {
                i += 2;
                continue;
            }
            b'{' => depth += 1,
            b'}' => depth = depth.saturating_sub(1),
            b'|' if depth == 0 => {
                segments.push(&inner[segment_start..i]);
                segment_start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    segments.push(&inner[segment_start..]);
    segments
}

fn parse_block(raw: &str, depth: usize) -> Node {
    if depth >= MAX_NESTING_DEPTH {
        return Node::Text(raw.to_string());
    }

    let inner = &raw[1..raw.len() - 1];
    let mut segments = split_top_level(inner);

    let select = match parse_select_header(segments[0]) {
        Some((select, first)) => {
            segments[0] = first;
            Some(select)
        }
        None => None,
    };

    let options = segments
        .into_iter()
        .map(|segment| {
            let option = WeightedOption::parse(segment);
            let nodes = parse_at_depth(option.text(), depth + 1);
            BlockOption { option, nodes }
        })
        .collect();

    Node::Block(OptionBlock {
        raw: raw.to_string(),
        select,
        options,
    })
}

/// Recognises `n$$`, `n-m$$`, `-n$$` and the `...$$sep$$` form at the start
/// of a block's first segment. Returns the header and the remaining text of
/// the first option.
fn parse_select_header(first: &str) -> Option<(MultiSelect, &str)> {
    let mut parts = first.splitn(3, "$$");
    let header = parts.next()?;
    let second = parts.next()?;

    let caps = select_header_regex().captures(header)?;
    let range = match (caps.get(1), caps.get(2), caps.get(3)) {
        (_, _, Some(max)) => SelectRange::UpTo(max.as_str().parse().ok()?),
        (Some(low), Some(high), None) => {
            SelectRange::Between(low.as_str().parse().ok()?, high.as_str().parse().ok()?)
        }
        (Some(count), None, None) => SelectRange::Exact(count.as_str().parse().ok()?),
        (None, _, None) => return None,
    };

    match parts.next() {
        Some(rest) => Some((
            MultiSelect {
                range,
                separator: second.to_string(),
            },
            rest,
        )),
        None => Some((
            MultiSelect {
                range,
                separator: DEFAULT_SEPARATOR.to_string(),
            },
            second,
        )),
    }
}

fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text(last)) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(Node::Text(text.to_string()));
    }
}
