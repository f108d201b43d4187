//! Quire Core Library
//!
//! This crate turns a set of Markdown documents into linked HTML pages. Each
//! document is converted into a title, rendered metadata, a body and a table
//! of contents fragment; a [`Project`] then lays the results out as standalone
//! pages, one merged page, or a book with prev/next navigation and an index.

pub mod config;
pub mod convert;
pub mod error;
pub mod links;
pub mod page;
pub mod paths;
pub mod project;
pub mod sources;
pub mod special;
pub mod style;
pub mod toc;
pub mod types;

pub use config::{MarkdownExtension, NavStyle, OutputMode, SiteConfig, Stylesheet};
pub use convert::{Converted, Converter};
pub use error::{ConfigError, Error, RenderError, Result};
pub use paths::PathResolver;
pub use project::{BuildReport, Project};
pub use sources::{collect_sources, Sources};
pub use types::{
    Document, Header, IndexEntry, MergedPage, Metadata, NavLink, Navigation, TocEntry,
};
