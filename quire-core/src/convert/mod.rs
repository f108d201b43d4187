//! Markdown to HTML conversion of a single document

mod meta;
mod slug;

pub use meta::{guard_setext_heading, metadata_to_html, split_metadata};
pub use slug::{slugify, AnchorSet};

use crate::config::SiteConfig;
use crate::error::RenderError;
use crate::types::{Document, TocEntry};
use pulldown_cmark::{html, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use scraper::{Html, Selector};
use std::fs;
use std::path::{Path, PathBuf};

/// The pieces rendered from one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Converted {
    /// Metadata title, else the first `<h1>` of the body
    pub title: Option<String>,
    pub meta_html: String,
    pub body_html: String,
    pub toc_fragment: String,
}

impl Converted {
    /// Attach source and output locations
    pub fn into_document(self, source_path: PathBuf, output_path: PathBuf) -> Document {
        Document {
            source_path,
            output_path,
            title: self.title,
            meta_html: self.meta_html,
            body_html: self.body_html,
            toc_fragment: self.toc_fragment,
        }
    }
}

/// Converter for Markdown documents
#[derive(Debug, Clone)]
pub struct Converter {
    options: Options,
}

impl Converter {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Converter using the parser options of a run
    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.markdown_options())
    }

    /// Read and convert a document from disk
    pub fn convert_file(&self, path: &Path) -> Result<Converted, RenderError> {
        let text = read_source(path)?;
        tracing::debug!("Converting {:?}", path);
        self.convert(&text)
    }

    /// Convert raw Markdown text
    pub fn convert(&self, raw: &str) -> Result<Converted, RenderError> {
        self.convert_with(raw, &mut AnchorSet::new())
    }

    /// Convert raw Markdown text, drawing heading anchors from `anchors`.
    ///
    /// Sharing one set across documents keeps anchors unique when their
    /// bodies end up on the same page.
    pub fn convert_with(
        &self,
        raw: &str,
        anchors: &mut AnchorSet,
    ) -> Result<Converted, RenderError> {
        let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
        let text = guard_setext_heading(raw);
        let (metadata, markdown) = split_metadata(&text);

        let (body_html, headings) = self.render(markdown, anchors);
        let toc_fragment = TocEntry::to_fragment(&TocEntry::nest(headings));

        let (meta_title, meta_html) = match metadata {
            Some(mut metadata) => metadata_to_html(&mut metadata),
            None => (None, String::new()),
        };
        let title = match meta_title {
            Some(title) => Some(title),
            None => first_heading(&body_html)?,
        };

        Ok(Converted {
            title,
            meta_html,
            body_html,
            toc_fragment,
        })
    }

    /// Render Markdown to HTML, giving every heading an anchor.
    ///
    /// Returns the HTML and the headings in document order.
    fn render(&self, markdown: &str, anchors: &mut AnchorSet) -> (String, Vec<TocEntry>) {
        let mut events: Vec<Event> = Parser::new_ext(markdown, self.options).collect();
        let mut headings = Vec::new();

        let mut i = 0;
        while i < events.len() {
            let (level, explicit_id) = match &events[i] {
                Event::Start(Tag::Heading { level, id, .. }) => {
                    (*level, id.as_ref().map(|id| id.to_string()))
                }
                _ => {
                    i += 1;
                    continue;
                }
            };

            let end = find_heading_end(&events, i, level);
            let text = heading_text(&events[i + 1..end]);
            let anchor = match explicit_id {
                Some(id) => {
                    anchors.reserve(id.clone());
                    id
                }
                None => anchors.anchor_for(&text),
            };

            if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
                *id = Some(CowStr::from(anchor.clone()));
            }
            headings.push(TocEntry::new(text, format!("#{anchor}")).with_level(level_number(level)));

            i = end + 1;
        }

        let mut body = String::new();
        html::push_html(&mut body, events.into_iter());
        (body, headings)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(Options::empty())
    }
}

/// Read a source document as UTF-8 text
pub fn read_source(path: &Path) -> Result<String, RenderError> {
    let bytes = fs::read(path).map_err(|source| RenderError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| RenderError::InvalidUtf8(path.to_path_buf()))
}

/// Find the end event of the heading starting at `start`
fn find_heading_end(events: &[Event], start: usize, level: HeadingLevel) -> usize {
    events
        .iter()
        .enumerate()
        .skip(start + 1)
        .find(|(_, event)| matches!(event, Event::End(TagEnd::Heading(l)) if *l == level))
        .map(|(i, _)| i)
        .unwrap_or(events.len())
}

/// Plain text of a heading's inline events
fn heading_text(events: &[Event]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text.trim().to_string()
}

fn level_number(level: HeadingLevel) -> u32 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Inner text of the first top-level heading in rendered HTML
fn first_heading(body_html: &str) -> Result<Option<String>, RenderError> {
    let selector = Selector::parse("h1")
        .map_err(|e| RenderError::MalformedContent(format!("Invalid selector: {:?}", e)))?;
    let fragment = Html::parse_fragment(body_html);

    Ok(fragment
        .select(&selector)
        .next()
        .map(|h1| h1.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty()))
}
