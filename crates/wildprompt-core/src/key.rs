//! Wildcard key normalisation and hierarchical matching.
//!
//! Keys are lower-cased, slash-separated paths such as `fantasy/dragon`.
//! Backslashes become slashes and spaces become hyphens, so a file at
//! `Fantasy\Red Dragon.txt` and a reference `__fantasy/red-dragon__` meet at
//! the same key.

/// Normalizes a raw wildcard name or relative file path into a key.
pub fn normalize_key(raw: &str) -> String {
    raw.replace('\\', "/").replace(' ', "-").to_lowercase()
}

/// Renders a key the way prompts reference it (`__key__`).
pub fn render_key(key: &str) -> String {
    format!("__{}__", key)
}

/// Returns true for characters allowed inside a `__name__` reference.
pub fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '-' | '+' | '/' | '*' | '\\')
}

/// Depth-agnostic match: does `candidate` contain `name` as a whole path
/// segment run at any level of the hierarchy?
///
/// For `name = "dragon"` this matches `dragon`, `fantasy/dragon`,
/// `dragon/fire` and `fantasy/dragon/fire`, but not `dragonfly`.
pub fn matches_depth_agnostic(candidate: &str, name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    candidate == name
        || candidate
            .strip_suffix(name)
            .is_some_and(|head| head.ends_with('/'))
        || candidate
            .strip_prefix(name)
            .is_some_and(|tail| tail.starts_with('/'))
        || candidate.contains(&format!("/{}/", name))
}

/// Matches a key against a glob name such as `colors/*` or `*/dragon`.
///
/// `*/name` is the explicit depth-agnostic form. Any other pattern is
/// anchored at the start of the key (not the end), with `*` matching any run
/// of characters, and is also tried against `key/` so `colors/*` matches the
/// key `colors` itself.
pub fn matches_glob(pattern: &str, key: &str) -> bool {
    if let Some(base) = pattern.strip_prefix("*/").filter(|base| !base.is_empty()) {
        return matches_depth_agnostic(key, base);
    }
    prefix_glob(pattern, key) || prefix_glob(pattern, &format!("{}/", key))
}

fn prefix_glob(pattern: &str, text: &str) -> bool {
    let mut parts = pattern.split('*');
    let Some(head) = parts.next() else {
        return true;
    };
    let Some(mut rest) = text.strip_prefix(head) else {
        return false;
    };
    for part in parts {
        match rest.find(part) {
            Some(at) => rest = &rest[at + part.len()..],
            None => return false,
        }
    }
    true
}
