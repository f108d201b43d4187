//! Error types for Quire Core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for all Quire operations
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors in the run configuration, reported before any file is touched
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Source path does not exist: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("Unknown markdown extension: {0}")]
    UnknownExtension(String),

    #[error("Invalid option combination: {0}")]
    InvalidCombination(String),
}

/// Errors raised while turning a source document into HTML
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Document is not valid UTF-8: {}", .0.display())]
    InvalidUtf8(PathBuf),

    #[error("Malformed content: {0}")]
    MalformedContent(String),
}
