//! Core types shared across the assembly pipeline

mod document;
mod header;
mod metadata;
mod navigation;
mod toc;

pub use document::{Document, MergedPage};
pub use header::Header;
pub use metadata::Metadata;
pub use navigation::{IndexEntry, NavLink, Navigation};
pub use toc::TocEntry;
