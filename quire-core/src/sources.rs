//! Discovering the ordered list of source documents

use crate::error::{ConfigError, Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions of documents the pipeline converts
pub const DOCUMENT_EXTENSIONS: [&str; 3] = ["txt", "md", "markdown"];

/// Extension of ordered manifest files
pub const MANIFEST_EXTENSION: &str = "list";

/// Whether `path` has an accepted document extension
pub fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            DOCUMENT_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
        .unwrap_or(false)
}

/// The documents of a run and the root their paths are relative to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sources {
    /// Root used for tree-preserving output
    pub root: PathBuf,

    /// Documents in processing order
    pub files: Vec<PathBuf>,
}

/// Collect the documents named by `input`.
///
/// `input` may be a single document, a directory (walked recursively, sorted
/// by file name) or a `.list` manifest with one path per line in the desired
/// order. Manifest entries that do not exist are skipped silently.
pub fn collect_sources(input: &Path) -> Result<Sources> {
    if !input.exists() {
        return Err(ConfigError::MissingSource(input.to_path_buf()).into());
    }

    if input.is_dir() {
        let files = walk_directory(input)?;
        tracing::debug!("Found {} documents under {:?}", files.len(), input);
        return Ok(Sources {
            root: input.to_path_buf(),
            files,
        });
    }

    let is_manifest = input
        .extension()
        .map(|e| e == MANIFEST_EXTENSION)
        .unwrap_or(false);
    if is_manifest {
        let root = input.parent().unwrap_or(Path::new("")).to_path_buf();
        let files = read_manifest(input)?;
        tracing::debug!("Manifest {:?} lists {} documents", input, files.len());
        return Ok(Sources { root, files });
    }

    let files = if is_document(input) {
        vec![input.to_path_buf()]
    } else {
        Vec::new()
    };
    Ok(Sources {
        root: input.to_path_buf(),
        files,
    })
}

fn walk_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        if entry.file_type().is_file() && is_document(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn read_manifest(manifest: &Path) -> Result<Vec<PathBuf>> {
    let content = fs::read_to_string(manifest)?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
    let base = manifest.parent().unwrap_or(Path::new(""));

    let mut files = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let as_given = PathBuf::from(line);
        let path = if as_given.exists() {
            as_given
        } else {
            base.join(line)
        };

        if is_document(&path) && path.is_file() {
            files.push(path);
        } else {
            tracing::debug!("Skipping manifest entry {:?}", line);
        }
    }
    Ok(files)
}
