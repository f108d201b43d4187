//! Heading anchor generation

use std::collections::{HashMap, HashSet};

/// GitHub-style slug: lowercase ASCII alphanumerics joined by single hyphens
pub fn slugify(text: &str) -> String {
    text.chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() {
                Some(c.to_ascii_lowercase())
            } else if c.is_whitespace() || c == '-' || c == '_' {
                Some('-')
            } else {
                None
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Hands out anchors that are unique within one document, or within one
/// merged page when shared across documents
#[derive(Debug, Default)]
pub struct AnchorSet {
    used: HashSet<String>,
    suffixes: HashMap<String, usize>,
}

impl AnchorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve an anchor for `text`, suffixing `-1`, `-2`, ... on repeats
    pub fn anchor_for(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base = "section".to_string();
        }
        self.reserve(base)
    }

    /// Reserve `anchor`, or the first free suffixed form of it when taken
    pub fn reserve(&mut self, anchor: String) -> String {
        if self.used.insert(anchor.clone()) {
            return anchor;
        }
        let counter = self.suffixes.entry(anchor.clone()).or_insert(0);
        loop {
            *counter += 1;
            let candidate = format!("{}-{}", anchor, counter);
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}
