//! Run configuration threaded through every pipeline component

use crate::error::ConfigError;
use pulldown_cmark::Options;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How the converted documents are laid out on disk
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// One independent page per document
    #[default]
    Standalone,

    /// All documents concatenated into a single page
    Merge,

    /// One page per document with prev/next navigation and an index
    Book,
}

/// Label style for book navigation links
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NavStyle {
    /// `< prev` / `next >`
    #[default]
    Plain,

    /// The neighbouring page titles
    Titles,
}

/// Stylesheet referenced by every page
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Stylesheet {
    /// Built-in stylesheet inlined in a `<style>` element
    Embedded { serif: bool },

    /// `<link>` to a user stylesheet, `href` used verbatim
    External(String),
}

impl Default for Stylesheet {
    fn default() -> Self {
        Stylesheet::Embedded { serif: false }
    }
}

/// Optional Markdown syntax extensions, selectable by name
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MarkdownExtension {
    Tables,
    Footnotes,
    Strikethrough,
    TaskLists,
    SmartPunctuation,
    HeadingAttributes,
}

impl MarkdownExtension {
    /// Extensions enabled on every run
    pub const DEFAULTS: [MarkdownExtension; 4] = [
        MarkdownExtension::Tables,
        MarkdownExtension::Footnotes,
        MarkdownExtension::Strikethrough,
        MarkdownExtension::HeadingAttributes,
    ];

    fn options(self) -> Options {
        match self {
            MarkdownExtension::Tables => Options::ENABLE_TABLES,
            MarkdownExtension::Footnotes => Options::ENABLE_FOOTNOTES,
            MarkdownExtension::Strikethrough => Options::ENABLE_STRIKETHROUGH,
            MarkdownExtension::TaskLists => Options::ENABLE_TASKLISTS,
            MarkdownExtension::SmartPunctuation => Options::ENABLE_SMART_PUNCTUATION,
            MarkdownExtension::HeadingAttributes => Options::ENABLE_HEADING_ATTRIBUTES,
        }
    }
}

impl FromStr for MarkdownExtension {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "tables" => Ok(MarkdownExtension::Tables),
            "footnotes" => Ok(MarkdownExtension::Footnotes),
            "strikethrough" => Ok(MarkdownExtension::Strikethrough),
            "tasklists" | "task-lists" => Ok(MarkdownExtension::TaskLists),
            "smart-punctuation" | "smarty" => Ok(MarkdownExtension::SmartPunctuation),
            "heading-attributes" | "attr-list" => Ok(MarkdownExtension::HeadingAttributes),
            _ => Err(ConfigError::UnknownExtension(s.to_string())),
        }
    }
}

/// Everything a run needs to know, passed explicitly to each component
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SiteConfig {
    /// Root of the source tree; stripped from source paths when mirroring
    pub source_root: PathBuf,

    /// Output folder. `None` writes each page next to its source
    pub output_root: Option<PathBuf>,

    /// Directory that relative paths are anchored at (the working directory)
    pub base_dir: PathBuf,

    /// Discard the source directory structure
    pub flatten: bool,

    pub mode: OutputMode,

    /// Maximum merged TOC depth, 0 = unlimited. Merge mode only
    pub toc_depth: usize,

    /// Book mode only
    pub nav_style: NavStyle,

    pub stylesheet: Stylesheet,

    /// Explicit header document
    pub header: Option<PathBuf>,

    /// Explicit book index document
    pub index: Option<PathBuf>,

    /// Extensions enabled on top of [`MarkdownExtension::DEFAULTS`]
    pub extensions: Vec<MarkdownExtension>,
}

impl SiteConfig {
    /// Create a configuration for sources under `source_root`
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            output_root: None,
            base_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            flatten: false,
            mode: OutputMode::default(),
            toc_depth: 0,
            nav_style: NavStyle::default(),
            stylesheet: Stylesheet::default(),
            header: None,
            index: None,
            extensions: Vec::new(),
        }
    }

    pub fn with_output_root(mut self, output_root: impl Into<PathBuf>) -> Self {
        self.output_root = Some(output_root.into());
        self
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn with_flatten(mut self, flatten: bool) -> Self {
        self.flatten = flatten;
        self
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_toc_depth(mut self, depth: usize) -> Self {
        self.toc_depth = depth;
        self
    }

    pub fn with_nav_style(mut self, style: NavStyle) -> Self {
        self.nav_style = style;
        self
    }

    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    pub fn with_header(mut self, header: impl Into<PathBuf>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn with_index(mut self, index: impl Into<PathBuf>) -> Self {
        self.index = Some(index.into());
        self
    }

    pub fn with_extensions(mut self, extensions: Vec<MarkdownExtension>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Directory that receives run-level files (merged page, book index)
    pub fn output_dir(&self) -> &Path {
        self.output_root.as_deref().unwrap_or(&self.base_dir)
    }

    /// Parser options for the default plus configured extensions
    pub fn markdown_options(&self) -> Options {
        MarkdownExtension::DEFAULTS
            .iter()
            .chain(self.extensions.iter())
            .fold(Options::empty(), |opts, ext| opts | ext.options())
    }

    /// Reject option combinations that only make sense in another mode
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.toc_depth > 0 && self.mode != OutputMode::Merge {
            return Err(ConfigError::InvalidCombination(
                "a TOC depth requires merge mode".to_string(),
            ));
        }
        if self.nav_style == NavStyle::Titles && self.mode != OutputMode::Book {
            return Err(ConfigError::InvalidCombination(
                "navigation titles require book mode".to_string(),
            ));
        }
        if self.index.is_some() && self.mode != OutputMode::Book {
            return Err(ConfigError::InvalidCombination(
                "a custom index requires book mode".to_string(),
            ));
        }
        Ok(())
    }
}
