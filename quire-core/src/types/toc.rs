//! Table of contents types

use crate::page::escape_html;
use serde::Serialize;

/// A single entry in a document's table of contents
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TocEntry {
    /// Display title
    pub title: String,

    /// Target anchor within the page (`#id`)
    pub href: String,

    /// Heading level (1 = `<h1>`)
    pub level: u32,

    /// Child entries for nested TOC
    pub children: Vec<TocEntry>,
}

impl TocEntry {
    /// Create a new TOC entry
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            level: 1,
            children: Vec::new(),
        }
    }

    /// Set the heading level
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Add child entries
    pub fn with_children(mut self, children: Vec<TocEntry>) -> Self {
        self.children = children;
        self
    }

    /// Add a single child entry
    pub fn add_child(&mut self, child: TocEntry) {
        self.children.push(child);
    }

    /// Nest a flat, document-ordered list of headings by level.
    ///
    /// A heading becomes a child of the closest preceding heading with a
    /// lower level; otherwise it is a sibling.
    pub fn nest(flat: Vec<TocEntry>) -> Vec<TocEntry> {
        let mut roots = Vec::new();
        for entry in flat {
            insert_nested(&mut roots, entry);
        }
        roots
    }

    /// Serialise entries as a TOC fragment, one markup token per line.
    ///
    /// Returns an empty string when there are no entries.
    pub fn to_fragment(entries: &[TocEntry]) -> String {
        if entries.is_empty() {
            return String::new();
        }
        let mut lines = vec![r#"<div class="toc">"#.to_string()];
        push_list(entries, &mut lines);
        lines.push("</div>".to_string());
        lines.join("\n")
    }
}

fn insert_nested(siblings: &mut Vec<TocEntry>, entry: TocEntry) {
    if let Some(last) = siblings.last_mut() {
        if entry.level > last.level {
            insert_nested(&mut last.children, entry);
            return;
        }
    }
    siblings.push(entry);
}

fn push_list(entries: &[TocEntry], lines: &mut Vec<String>) {
    lines.push("<ul>".to_string());
    for entry in entries {
        let link = format!(
            r#"<li><a href="{}">{}</a>"#,
            escape_html(&entry.href),
            escape_html(&entry.title)
        );
        if entry.children.is_empty() {
            lines.push(link + "</li>");
        } else {
            lines.push(link);
            push_list(&entry.children, lines);
            lines.push("</li>".to_string());
        }
    }
    lines.push("</ul>".to_string());
}
