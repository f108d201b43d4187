//! Metadata block parsing and rendering
//!
//! A metadata block is a run of `Key: value` lines at the very top of a
//! document, optionally fenced by `---`. Lines indented by four or more
//! spaces continue the previous key. The block ends at the first blank line
//! or at the first line that is neither a key nor a continuation.

use crate::page::escape_html;
use crate::types::Metadata;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static KEY_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}([A-Za-z0-9_-]+):\s*(.*)$").unwrap());

static CONTINUATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^ {4,}(.*)$").unwrap());

static OPEN_FENCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-{3}(\s.*)?$").unwrap());

static CLOSE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-{3}|\.{3})(\s.*)?$").unwrap());

/// Recognized fields, rendered first and in this order
const KNOWN_FIELDS: [(&str, &str); 5] = [
    ("title", "h1"),
    ("author", "h2"),
    ("date", "h3"),
    ("summary", "p"),
    ("comment", "p"),
];

/// Guard against a setext heading on the first line being read as a key.
///
/// When the second line starts with `==` or `--`, a blank line is injected
/// in front of the document so no metadata block is detected. This is a
/// heuristic: a real metadata block whose second line starts with `--` is
/// treated as body text.
pub fn guard_setext_heading(text: &str) -> Cow<'_, str> {
    match text.lines().nth(1) {
        Some(second) if second.starts_with("==") || second.starts_with("--") => {
            Cow::Owned(format!("\n{text}"))
        }
        _ => Cow::Borrowed(text),
    }
}

/// Split a leading metadata block off `text`.
///
/// Returns `None` for the metadata when no block was found, together with
/// the remaining Markdown.
pub fn split_metadata(text: &str) -> (Option<Metadata>, &str) {
    let mut lines = text.split_inclusive('\n').peekable();
    let mut offset = 0;

    if let Some(&first) = lines.peek() {
        let opens_block = OPEN_FENCE_RE.is_match(first.trim_end());
        let key_follows = text[first.len()..]
            .lines()
            .next()
            .map(|line| KEY_LINE_RE.is_match(line))
            .unwrap_or(false);
        if opens_block && key_follows {
            offset += first.len();
            lines.next();
        }
    }

    let mut meta = Metadata::new();
    for raw in lines {
        let line = raw.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() || CLOSE_FENCE_RE.is_match(line) {
            offset += raw.len();
            break;
        }
        if let Some(caps) = KEY_LINE_RE.captures(line) {
            meta.insert(&caps[1], caps[2].trim());
        } else if let Some(caps) = CONTINUATION_RE.captures(line) {
            if !meta.extend_last(caps[1].trim()) {
                break;
            }
        } else {
            break;
        }
        offset += raw.len();
    }

    if meta.is_empty() {
        (None, text)
    } else {
        (Some(meta), &text[offset..])
    }
}

/// Render metadata as HTML, consuming the recognized fields.
///
/// Recognized fields come first in their fixed order, each as
/// `<tag class="field">value</tag>`. Whatever is left afterwards is rendered
/// as a definition list in source order. Returns the title, if any, with the
/// HTML.
pub fn metadata_to_html(meta: &mut Metadata) -> (Option<String>, String) {
    let mut html = String::new();
    let mut title = None;

    for (field, tag) in KNOWN_FIELDS {
        let Some(values) = meta.take(field) else {
            continue;
        };
        let value = values.into_iter().next().unwrap_or_default();
        html.push_str(&format!(
            "<{tag} class=\"{field}\">{}</{tag}>\n",
            escape_html(&value)
        ));
        if field == "title" && !value.is_empty() {
            title = Some(value);
        }
    }

    if !meta.is_empty() {
        html.push_str("<dl>\n");
        for (key, values) in meta.iter() {
            let value = values.first().map(|s| s.as_str()).unwrap_or_default();
            html.push_str(&format!(
                "\t<dt>{}</dt>\n\t<dd>{}</dd>\n",
                escape_html(key),
                escape_html(value)
            ));
        }
        html.push_str("</dl>\n");
    }

    (title, html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple_block() {
        let text = "Title: My Doc\nAuthor: Jane\n\n# Body\n";
        let (meta, rest) = split_metadata(text);
        let meta = meta.unwrap();

        assert_eq!(meta.first("title"), Some("My Doc"));
        assert_eq!(meta.first("author"), Some("Jane"));
        assert_eq!(rest, "# Body\n");
    }

    #[test]
    fn test_continuation_lines() {
        let text = "Authors: Jane\n    John\nDate: today\n\nBody";
        let (meta, rest) = split_metadata(text);
        let meta = meta.unwrap();

        assert_eq!(meta.get("authors").unwrap(), &["Jane", "John"]);
        assert_eq!(rest, "Body");
    }

    #[test]
    fn test_non_matching_line_stays_in_body() {
        let text = "Title: Doc\nplain text line\n";
        let (meta, rest) = split_metadata(text);
        assert_eq!(meta.unwrap().len(), 1);
        assert_eq!(rest, "plain text line\n");
    }

    #[test]
    fn test_fenced_block() {
        let text = "---\ntitle: Fenced\n---\nBody\n";
        let (meta, rest) = split_metadata(text);
        assert_eq!(meta.unwrap().first("title"), Some("Fenced"));
        assert_eq!(rest, "Body\n");
    }

    #[test]
    fn test_leading_rule_is_not_a_fence() {
        let text = "---\n\nBody\n";
        let (meta, rest) = split_metadata(text);
        assert!(meta.is_none());
        assert_eq!(rest, text);
    }

    #[test]
    fn test_no_block() {
        let text = "# Heading\n\nText";
        let (meta, rest) = split_metadata(text);
        assert!(meta.is_none());
        assert_eq!(rest, text);
    }

    #[test]
    fn test_setext_guard() {
        let guarded = guard_setext_heading("Chapter: One\n============\n\nText");
        assert!(guarded.starts_with('\n'));
        let (meta, _) = split_metadata(&guarded);
        assert!(meta.is_none());

        let untouched = guard_setext_heading("Title: x\n\nText");
        assert!(matches!(untouched, Cow::Borrowed(_)));
    }

    #[test]
    fn test_known_fields_render_in_fixed_order() {
        let mut meta = Metadata::new();
        meta.insert("date", "2021-03-04");
        meta.insert("title", "Report");
        meta.insert("unknownField", "extra");
        meta.insert("author", "Ann");

        let (title, html) = metadata_to_html(&mut meta);

        assert_eq!(title.as_deref(), Some("Report"));
        assert_eq!(
            html,
            "<h1 class=\"title\">Report</h1>\n\
             <h2 class=\"author\">Ann</h2>\n\
             <h3 class=\"date\">2021-03-04</h3>\n\
             <dl>\n\t<dt>unknownfield</dt>\n\t<dd>extra</dd>\n</dl>\n"
        );
        assert!(meta.get("title").is_none());
    }

    #[test]
    fn test_values_are_escaped() {
        let mut meta = Metadata::new();
        meta.insert("summary", "a < b & c");
        let (title, html) = metadata_to_html(&mut meta);
        assert!(title.is_none());
        assert_eq!(html, "<p class=\"summary\">a &lt; b &amp; c</p>\n");
    }
}
