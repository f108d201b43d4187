//! Book navigation and index types

use serde::Serialize;

/// A link to a neighbouring page
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub title: String,
}

impl NavLink {
    pub fn new(href: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            title: title.into(),
        }
    }
}

/// Previous/next neighbours of a book page. `None` on the first/last page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    pub prev: Option<NavLink>,
    pub next: Option<NavLink>,
}

/// One line of the generated book index
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IndexEntry {
    /// Link relative to the index page
    pub href: String,
    pub title: String,
}
