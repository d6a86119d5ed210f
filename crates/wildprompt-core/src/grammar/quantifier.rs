//! Quantifier rewriting: `N#__name__` becomes `N` `|`-joined copies of `__name__`.

use std::sync::OnceLock;

use regex::Regex;

/// Largest repetition count that is expanded; larger counts stay literal.
pub const MAX_QUANTIFIER: usize = 1000;

const QUANTIFIER_PATTERN: &str = r"(\d+)#__([\w.\-+/*\\]+?)__";

static QUANTIFIER_REGEX: OnceLock<Regex> = OnceLock::new();

fn quantifier_regex() -> &'static Regex {
    QUANTIFIER_REGEX.get_or_init(|| Regex::new(QUANTIFIER_PATTERN).expect("invalid regex pattern"))
}

/// Rewrites every quantified wildcard in `text`.
///
/// `{2$$3#__color__}` becomes `{2$$__color__|__color__|__color__}`, so the
/// block picks two of three independent rolls. The rewrite is purely textual
/// and happens before the block is parsed.
pub fn expand_quantifiers(text: &str) -> String {
    expand_quantifiers_within(text, usize::MAX)
}

/// Like [`expand_quantifiers`], but never lets the result grow past
/// `max_bytes`.
///
/// Once a rewrite would push the result over the limit, that quantifier and
/// everything after it are copied through unchanged. The result is therefore
/// at most `max(max_bytes, text.len())` bytes long.
pub fn expand_quantifiers_within(text: &str, max_bytes: usize) -> String {
    let mut out = String::with_capacity(text.len().min(max_bytes));
    let mut last = 0;

    for caps in quantifier_regex().captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let Some(count) = caps[1]
            .parse::<usize>()
            .ok()
            .filter(|&count| count <= MAX_QUANTIFIER)
        else {
            continue;
        };

        let reference = format!("__{}__", &caps[2]);
        let expanded_len = (reference.len() + 1) * count - usize::from(count > 0);
        let projected =
            out.len() + (whole.start() - last) + expanded_len + (text.len() - whole.end());
        if projected > max_bytes {
            break;
        }

        out.push_str(&text[last..whole.start()]);
        out.push_str(&vec![reference; count].join("|"));
        last = whole.end();
    }

    out.push_str(&text[last..]);
    out
}
