//! Comment stripping.
//!
//! A `#` opens a comment that runs to the end of the line when it is
//! unescaped and sits at a token boundary (start of line, or after
//! whitespace). `3#__color__` is therefore a quantifier, not a comment, and
//! `\#` yields a literal `#`.
//!
//! The line following a comment is joined to the text before the comment with
//! exactly one space; a line that is nothing but a comment disappears and the
//! next line joins the previous kept line. Blank lines are never joined.

/// Removes comments from `text` before expansion.
pub fn strip_comments(text: &str) -> String {
    let mut kept: Vec<String> = Vec::new();
    let mut join_next = false;

    for line in text.split('\n') {
        let (content, had_comment) = strip_line(line);

        if had_comment && content.trim().is_empty() {
            if !kept.is_empty() {
                join_next = true;
            }
            continue;
        }

        match kept.last_mut() {
            Some(last) if join_next && !last.trim().is_empty() && !content.trim().is_empty() => {
                last.push(' ');
                last.push_str(content.trim_start());
            }
            _ => kept.push(content),
        }
        join_next = had_comment;
    }

    kept.join("\n")
}

/// Strips a comment from a single line.
///
/// Returns the line content with trailing whitespace before the comment
/// removed, and whether a comment was found.
fn strip_line(line: &str) -> (String, bool) {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    let mut prev: Option<char> = None;

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'#') => {
                chars.next();
                out.push('#');
                prev = Some('#');
            }
            '#' if prev.map_or(true, char::is_whitespace) => {
                let trimmed = out.trim_end().len();
                out.truncate(trimmed);
                return (out, true);
            }
            _ => {
                out.push(c);
                prev = Some(c);
            }
        }
    }

    (out, false)
}
