//! Document type representing one converted source file

use std::path::{Path, PathBuf};

/// One source file and the HTML pieces rendered from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Path of the Markdown source
    pub source_path: PathBuf,

    /// Where the rendered page is written
    pub output_path: PathBuf,

    /// Title from the metadata block or the first `<h1>`
    pub title: Option<String>,

    /// Rendered metadata fields
    pub meta_html: String,

    /// Rendered body, without metadata and TOC
    pub body_html: String,

    /// Nested-list table of contents, empty when the document has no headings
    pub toc_fragment: String,
}

impl Document {
    /// Title to show to readers, falling back to the output path
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => self.output_path.display().to_string(),
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

/// The single page produced by merge mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedPage {
    /// Destination of the merged file
    pub output_path: PathBuf,

    /// Title of the header document, if any
    pub title: Option<String>,

    /// Header HTML with the table of contents substituted in
    pub header_html: String,

    /// Concatenated `<article>` blocks, one per document
    pub articles: String,
}

impl MergedPage {
    /// Title to show to readers, falling back to the merged file stem
    pub fn display_title(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        self.output_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
