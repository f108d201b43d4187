//! The shared header document

/// A rendered header, prefixed to every output page.
///
/// An absent header is `Header::default()`: no title and empty HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    /// Title used as the page title prefix
    pub title: Option<String>,

    /// Metadata and body wrapped in `<section id="head">`
    pub html: String,
}

impl Header {
    pub fn new(title: Option<String>, html: impl Into<String>) -> Self {
        Self {
            title,
            html: html.into(),
        }
    }

    /// Whether a header document was actually loaded
    pub fn is_present(&self) -> bool {
        self.title.is_some() || !self.html.is_empty()
    }
}
