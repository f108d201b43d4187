//! Merging per-document TOC fragments into one table of contents
//!
//! Fragments are handled as flat token streams rather than trees. Each line
//! is a token, with `<ul>` and `</ul>` split out as tokens of their own, and
//! list depth is tracked with a single counter.

use regex::Regex;
use std::sync::LazyLock;

const TOC_OPEN: &str = r#"<div class="toc">"#;
const TOC_CLOSE: &str = "</div>";
const LIST_OPEN: &str = "<ul>";
const LIST_CLOSE: &str = "</ul>";

static LIST_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?ul>").unwrap());

/// Placeholder in the header body replaced by the merged TOC
pub const TOC_PLACEHOLDER: &str = "[TOC_HERE]";

/// Merge TOC fragments, keeping at most `max_depth` nesting levels.
///
/// `max_depth == 0` keeps everything. With `1`, only the first top-level
/// entry of every fragment survives. Deeper limits drop tokens nested past
/// the limit; the `<ul>` that crosses the limit is kept (empty) so that its
/// closing tag, which falls back inside the limit, stays balanced.
///
/// The result is always wrapped in a single `<div class="toc"><ul>`.
pub fn merge_tocs<S: AsRef<str>>(fragments: &[S], max_depth: usize) -> String {
    let mut kept: Vec<&str> = Vec::new();

    for fragment in fragments {
        let tokens = tokenize(fragment.as_ref());
        let body = interior(&tokens);

        match max_depth {
            0 => kept.extend_from_slice(body),
            1 => {
                if let Some(&first) = body.first() {
                    kept.push(first);
                    if !first.ends_with("</li>") {
                        kept.push("</li>");
                    }
                }
            }
            depth => filter_depth(body, depth, &mut kept),
        }
    }

    let mut lines = vec![TOC_OPEN, LIST_OPEN];
    lines.extend(kept);
    lines.push(LIST_CLOSE);
    lines.push(TOC_CLOSE);
    lines.join("\n")
}

/// Split a fragment into trimmed, non-empty tokens
pub fn tokenize(fragment: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for line in fragment.lines() {
        let mut last = 0;
        for m in LIST_TOKEN_RE.find_iter(line) {
            push_token(&mut tokens, &line[last..m.start()]);
            tokens.push(m.as_str());
            last = m.end();
        }
        push_token(&mut tokens, &line[last..]);
    }
    tokens
}

fn push_token<'a>(tokens: &mut Vec<&'a str>, text: &'a str) {
    let text = text.trim();
    if !text.is_empty() {
        tokens.push(text);
    }
}

/// Tokens inside the outer `<div class="toc"><ul> ... </ul></div>`
fn interior<'t, 'a>(tokens: &'t [&'a str]) -> &'t [&'a str] {
    let mut body = tokens;
    if body.first() == Some(&TOC_OPEN) {
        body = &body[1..];
    }
    if body.first() == Some(&LIST_OPEN) {
        body = &body[1..];
    }
    if body.last() == Some(&TOC_CLOSE) {
        body = &body[..body.len() - 1];
    }
    if body.last() == Some(&LIST_CLOSE) {
        body = &body[..body.len() - 1];
    }
    body
}

fn filter_depth<'a>(tokens: &[&'a str], max_depth: usize, out: &mut Vec<&'a str>) {
    // the stripped outer list counts as level 1
    let mut depth = 1usize;
    for &token in tokens {
        match token {
            LIST_OPEN => depth += 1,
            LIST_CLOSE => depth = depth.saturating_sub(1),
            _ => {}
        }

        if depth <= max_depth || (token == LIST_OPEN && depth == max_depth + 1) {
            out.push(token);
        }
    }
}
