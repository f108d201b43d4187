//! Rewriting links between source documents into links between pages

use crate::config::SiteConfig;
use crate::convert::Converter;
use crate::error::Result;
use crate::paths::PathResolver;
use crate::sources::is_document;
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Literal sequence a line must contain to be considered for rewriting
pub const LINK_MARKER: &str = "](";

static DOC_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)\s]+)\)").unwrap());

/// Rewrites `[label](other.md)` links in raw Markdown.
///
/// The target path becomes the relative href of the target's output page.
/// An empty label is filled with the target's title when the target exists
/// and has one, else with the raw path. Titles are cached per target for the
/// lifetime of the rewriter.
pub struct LinkRewriter<'a> {
    converter: &'a Converter,
    resolver: PathResolver<'a>,
    titles: HashMap<PathBuf, Option<String>>,
}

impl<'a> LinkRewriter<'a> {
    pub fn new(config: &'a SiteConfig, converter: &'a Converter) -> Self {
        Self {
            converter,
            resolver: PathResolver::new(config),
            titles: HashMap::new(),
        }
    }

    /// Rewrite document links in `text`, the source of the page written to
    /// `page_output`. Targets are looked up relative to `source`'s directory.
    pub fn rewrite(&mut self, text: &str, source: &Path, page_output: &Path) -> Result<String> {
        let base = source.parent().unwrap_or(Path::new(""));
        let mut out = String::with_capacity(text.len());
        for line in text.split_inclusive('\n') {
            if line.contains(LINK_MARKER) {
                out.push_str(&self.rewrite_line(line, base, page_output)?);
            } else {
                out.push_str(line);
            }
        }
        Ok(out)
    }

    fn rewrite_line(&mut self, line: &str, base: &Path, page_output: &Path) -> Result<String> {
        let mut out = String::with_capacity(line.len());
        let mut last = 0;

        for caps in DOC_LINK_RE.captures_iter(line) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let target = &caps[2];
            let is_image = line[..whole.start()].ends_with('!');
            if is_image || !is_document_target(target) {
                continue;
            }

            out.push_str(&line[last..whole.start()]);
            out.push_str(&self.rewrite_link(&caps[1], target, base, page_output)?);
            last = whole.end();
        }

        out.push_str(&line[last..]);
        Ok(out)
    }

    fn rewrite_link(
        &mut self,
        label: &str,
        target: &str,
        base: &Path,
        page_output: &Path,
    ) -> Result<String> {
        let (path_part, fragment) = match target.split_once('#') {
            Some((path, fragment)) => (path, Some(fragment)),
            None => (target, None),
        };

        let beside_source = base.join(path_part);
        let target_path = if !beside_source.is_file() && Path::new(path_part).is_file() {
            PathBuf::from(path_part)
        } else {
            beside_source
        };

        let label = if !label.is_empty() {
            label.to_string()
        } else if target_path.is_file() {
            match self.title_of(&target_path)? {
                Some(title) => escape_label(&title),
                None => path_part.to_string(),
            }
        } else {
            tracing::debug!("Link target {:?} not found, keeping raw label", target_path);
            path_part.to_string()
        };

        let mut href = self
            .resolver
            .relative_href(page_output, &self.resolver.resolve(&target_path));
        if let Some(fragment) = fragment {
            href.push('#');
            href.push_str(fragment);
        }

        Ok(format!("[{label}]({href})"))
    }

    /// Title of a target document, converting it at most once per run
    fn title_of(&mut self, target: &Path) -> Result<Option<String>> {
        let key = self.resolver.anchor(target);
        if let Some(title) = self.titles.get(&key) {
            return Ok(title.clone());
        }

        let title = self.converter.convert_file(target)?.title;
        self.titles.insert(key, title.clone());
        Ok(title)
    }

    /// Number of targets whose title has been resolved
    pub fn cached_titles(&self) -> usize {
        self.titles.len()
    }
}

fn is_document_target(target: &str) -> bool {
    if target.contains("://") || target.starts_with('#') || target.starts_with("mailto:") {
        return false;
    }
    let path = target.split('#').next().unwrap_or(target);
    is_document(Path::new(path))
}

fn escape_label(title: &str) -> String {
    title.replace('[', "\\[").replace(']', "\\]")
}
