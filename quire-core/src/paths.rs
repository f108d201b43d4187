//! Mapping source documents to output files and linking between them

use crate::config::SiteConfig;
use std::path::{Component, Path, PathBuf};

/// File name of the book index page
pub const INDEX_FILE: &str = "index.html";

/// Resolves output locations from a [`SiteConfig`].
///
/// Every method is a pure function of the configuration and its arguments;
/// nothing here touches the filesystem.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    config: &'a SiteConfig,
}

impl<'a> PathResolver<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Output page for a source document
    pub fn resolve(&self, source: &Path) -> PathBuf {
        let Some(output_root) = &self.config.output_root else {
            return source.with_extension("html");
        };

        let source_abs = self.anchor(source);
        let root_abs = self.anchor(&self.config.source_root);
        if self.config.flatten || source_abs == root_abs {
            return flattened(output_root, source);
        }

        match source_abs.strip_prefix(&root_abs) {
            Ok(relative) if !relative.as_os_str().is_empty() => {
                output_root.join(relative).with_extension("html")
            }
            // outside the source root, e.g. an entry of a .list manifest
            _ => flattened(output_root, source),
        }
    }

    /// Location of the book index page
    pub fn index_path(&self) -> PathBuf {
        self.config.output_dir().join(INDEX_FILE)
    }

    /// Location of the merged page.
    ///
    /// Named after the directory holding the last processed page, which
    /// resolves to the working directory when pages sit next to their
    /// sources at the top level.
    pub fn merged_path(&self, last_output: Option<&Path>) -> PathBuf {
        let name = last_output
            .and_then(|path| self.anchor(path).parent().and_then(dir_name))
            .or_else(|| dir_name(&self.anchor(self.config.output_dir())))
            .unwrap_or_else(|| "merged".to_string());
        self.config.output_dir().join(format!("{name}.html"))
    }

    /// Relative `href` from the page at `from` to the page at `to`, with
    /// each segment percent-encoded
    pub fn relative_href(&self, from: &Path, to: &Path) -> String {
        let from_abs = self.anchor(from);
        let from_dir = from_abs.parent().unwrap_or(Path::new(""));
        let to_abs = self.anchor(to);

        let from_parts: Vec<Component> = from_dir.components().collect();
        let to_parts: Vec<Component> = to_abs.components().collect();
        let common = from_parts
            .iter()
            .zip(&to_parts)
            .take_while(|(a, b)| a == b)
            .count();

        if common == 0 && !from_parts.is_empty() {
            // no shared root (different drive prefixes)
            return to_abs.to_string_lossy().replace('\\', "/");
        }

        let mut segments: Vec<String> = vec!["..".to_string(); from_parts.len() - common];
        segments.extend(
            to_parts[common..]
                .iter()
                .map(|c| urlencoding::encode(&c.as_os_str().to_string_lossy()).into_owned()),
        );
        segments.join("/")
    }

    /// Absolute, lexically normalised form of `path`
    pub fn anchor(&self, path: &Path) -> PathBuf {
        normalize(&self.config.base_dir.join(path))
    }
}

/// Lexically normalise a path: drop `.` and fold `..` into its parent
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn flattened(output_root: &Path, source: &Path) -> PathBuf {
    let stem = source.file_stem().unwrap_or(source.as_os_str());
    output_root.join(format!("{}.html", stem.to_string_lossy()))
}

fn dir_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}
