//! Locating the shared header and the custom book index in a file list

use crate::config::SiteConfig;
use crate::paths::PathResolver;
use std::path::{Path, PathBuf};

/// File-name marker of the shared header document
pub const HEADER_MARKER: &str = "_header.";

/// File-name marker of the custom book index
pub const INDEX_MARKER: &str = "_index.";

/// The working file list with special documents pulled out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialFiles {
    /// Documents to convert, in their original order
    pub remaining: Vec<PathBuf>,

    /// Absolute path of the header document
    pub header: Option<PathBuf>,

    /// Absolute path of the custom index
    pub index: Option<PathBuf>,
}

/// Split the header and index documents off `files`.
///
/// An explicit path from the configuration wins over the naming convention;
/// otherwise the first file whose name contains the marker is used. The chosen
/// document is removed from the list when it is part of it, in every mode;
/// only book mode renders the index.
pub fn locate_special(files: Vec<PathBuf>, config: &SiteConfig) -> SpecialFiles {
    let resolver = PathResolver::new(config);
    let mut remaining = files;

    let header = take_special(
        &mut remaining,
        config.header.as_deref(),
        HEADER_MARKER,
        &resolver,
    );
    let index = take_special(&mut remaining, config.index.as_deref(), INDEX_MARKER, &resolver);

    if let Some(path) = &header {
        tracing::debug!("Using header {:?}", path);
    }
    if let Some(path) = &index {
        tracing::debug!("Using custom index {:?}", path);
    }

    SpecialFiles {
        remaining,
        header,
        index,
    }
}

fn take_special(
    files: &mut Vec<PathBuf>,
    explicit: Option<&Path>,
    marker: &str,
    resolver: &PathResolver,
) -> Option<PathBuf> {
    let chosen = match explicit {
        Some(path) => path.to_path_buf(),
        None => files.iter().find(|p| name_contains(p, marker))?.clone(),
    };

    let chosen = resolver.anchor(&chosen);
    if let Some(pos) = files.iter().position(|p| resolver.anchor(p) == chosen) {
        files.remove(pos);
    }
    Some(chosen)
}

fn name_contains(path: &Path, marker: &str) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().contains(marker))
        .unwrap_or(false)
}
