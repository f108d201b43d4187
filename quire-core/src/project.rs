//! Running a whole conversion: special files, conversion, page assembly and writes

use crate::config::{OutputMode, SiteConfig};
use crate::convert::{read_source, AnchorSet, Converter};
use crate::error::{Error, Result};
use crate::links::LinkRewriter;
use crate::page::{
    assemble, assemble_index, assemble_merged, render_header, render_navigation, PageParts,
};
use crate::paths::PathResolver;
use crate::special::locate_special;
use crate::toc::{merge_tocs, TOC_PLACEHOLDER};
use crate::types::{Document, Header, IndexEntry, MergedPage, NavLink, Navigation};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Title of book index pages that have none of their own
const DEFAULT_INDEX_TITLE: &str = "Index";

/// Summary of a finished run
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BuildReport {
    pub mode: OutputMode,

    /// Every file written, in write order
    pub pages: Vec<PathBuf>,
}

impl BuildReport {
    fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            pages: Vec::new(),
        }
    }
}

/// A configured run over an ordered list of source documents
pub struct Project {
    config: SiteConfig,
    files: Vec<PathBuf>,
}

impl Project {
    pub fn new(config: SiteConfig, files: Vec<PathBuf>) -> Self {
        Self { config, files }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Convert every document and write the pages for the configured mode
    pub fn run(&self) -> Result<BuildReport> {
        self.config.validate()?;

        let special = locate_special(self.files.clone(), &self.config);
        if self.config.mode == OutputMode::Book && special.remaining.len() < 2 {
            return Err(Error::Precondition(format!(
                "book mode needs at least 2 documents, found {}",
                special.remaining.len()
            )));
        }

        let converter = Converter::from_config(&self.config);
        // one merged page needs anchors unique across every document
        let mut shared = (self.config.mode == OutputMode::Merge).then(AnchorSet::new);
        let header = self.load_header(&converter, special.header.as_deref(), shared.as_mut())?;
        let documents = match shared.as_mut() {
            Some(anchors) => self.convert_in_order(&converter, &special.remaining, anchors)?,
            None => self.convert_all(&converter, &special.remaining)?,
        };

        let mut report = BuildReport::new(self.config.mode);
        match self.config.mode {
            OutputMode::Standalone => self.write_standalone(&documents, &header, &mut report)?,
            OutputMode::Merge => self.write_merged(&documents, &header, &mut report)?,
            OutputMode::Book => self.write_book(
                &documents,
                &header,
                special.index.as_deref(),
                &converter,
                &mut report,
            )?,
        }

        tracing::info!(
            "Converted {} documents into {} page(s)",
            documents.len(),
            report.pages.len()
        );
        Ok(report)
    }

    fn load_header(
        &self,
        converter: &Converter,
        path: Option<&Path>,
        anchors: Option<&mut AnchorSet>,
    ) -> Result<Header> {
        let Some(path) = path else {
            return Ok(Header::default());
        };
        if !path.is_file() {
            tracing::debug!("Header {:?} not found, continuing without", path);
            return Ok(Header::default());
        }

        let converted = match anchors {
            Some(anchors) => converter.convert_with(&read_source(path)?, anchors)?,
            None => converter.convert_file(path)?,
        };
        Ok(Header::new(
            converted.title,
            render_header(&converted.meta_html, &converted.body_html),
        ))
    }

    /// Convert in parallel, keeping list order and reporting the first failure
    fn convert_all(&self, converter: &Converter, files: &[PathBuf]) -> Result<Vec<Document>> {
        let resolver = PathResolver::new(&self.config);
        let results: Vec<Result<Document>> = files
            .par_iter()
            .map(|path| -> Result<Document> {
                let converted = converter.convert_file(path)?;
                Ok(converted.into_document(path.clone(), resolver.resolve(path)))
            })
            .collect();

        results.into_iter().collect()
    }

    /// Convert one after another, drawing anchors from a single set
    fn convert_in_order(
        &self,
        converter: &Converter,
        files: &[PathBuf],
        anchors: &mut AnchorSet,
    ) -> Result<Vec<Document>> {
        let resolver = PathResolver::new(&self.config);
        files
            .iter()
            .map(|path| -> Result<Document> {
                let text = read_source(path)?;
                let converted = converter.convert_with(&text, anchors)?;
                Ok(converted.into_document(path.clone(), resolver.resolve(path)))
            })
            .collect()
    }

    fn write_standalone(
        &self,
        documents: &[Document],
        header: &Header,
        report: &mut BuildReport,
    ) -> Result<()> {
        for doc in documents {
            let title = doc.display_title();
            let parts = PageParts {
                title: &title,
                meta_html: &doc.meta_html,
                body_html: &doc.body_html,
                navigation: "",
            };
            let html = assemble(&parts, header, &self.config.stylesheet);
            self.write_page(&doc.output_path, &html, report)?;
        }
        Ok(())
    }

    fn write_merged(
        &self,
        documents: &[Document],
        header: &Header,
        report: &mut BuildReport,
    ) -> Result<()> {
        let resolver = PathResolver::new(&self.config);

        let mut fragments = Vec::new();
        let mut articles = String::new();
        for doc in documents {
            if !doc.toc_fragment.is_empty() {
                fragments.push(doc.toc_fragment.as_str());
            }
            articles.push_str(&format!(
                "\n<article>{}{}</article>\n",
                doc.meta_html, doc.body_html
            ));
        }

        let toc = merge_tocs(&fragments, self.config.toc_depth);
        let page = MergedPage {
            output_path: resolver.merged_path(documents.last().map(|d| d.output_path.as_path())),
            title: header.title.clone(),
            header_html: header.html.replace(TOC_PLACEHOLDER, &toc),
            articles,
        };

        let html = assemble_merged(&page, &self.config.stylesheet);
        self.write_page(&page.output_path, &html, report)
    }

    fn write_book(
        &self,
        documents: &[Document],
        header: &Header,
        custom_index: Option<&Path>,
        converter: &Converter,
        report: &mut BuildReport,
    ) -> Result<()> {
        let resolver = PathResolver::new(&self.config);
        let index_path = resolver.index_path();
        let mut entries = Vec::with_capacity(documents.len());

        for (i, doc) in documents.iter().enumerate() {
            let link = |other: &Document| {
                NavLink::new(
                    resolver.relative_href(&doc.output_path, &other.output_path),
                    other.display_title(),
                )
            };
            let nav = Navigation {
                prev: i.checked_sub(1).map(|p| link(&documents[p])),
                next: documents.get(i + 1).map(link),
            };
            let navigation = render_navigation(
                &nav,
                &resolver.relative_href(&doc.output_path, &index_path),
                self.config.nav_style,
            );

            let title = doc.display_title();
            let parts = PageParts {
                title: &title,
                meta_html: &doc.meta_html,
                body_html: &doc.body_html,
                navigation: &navigation,
            };
            let html = assemble(&parts, header, &self.config.stylesheet);
            self.write_page(&doc.output_path, &html, report)?;

            entries.push(IndexEntry {
                href: resolver.relative_href(&index_path, &doc.output_path),
                title,
            });
        }

        let html = match custom_index.filter(|path| path.is_file()) {
            Some(path) => self.custom_index(path, &index_path, header, converter)?,
            None => {
                if let Some(path) = custom_index {
                    tracing::debug!("Index {:?} not found, generating one", path);
                }
                let title = header.title.as_deref().unwrap_or(DEFAULT_INDEX_TITLE);
                assemble_index(title, header, &entries, &self.config.stylesheet)
            }
        };
        self.write_page(&index_path, &html, report)
    }

    fn custom_index(
        &self,
        path: &Path,
        index_path: &Path,
        header: &Header,
        converter: &Converter,
    ) -> Result<String> {
        let raw = read_source(path)?;
        let mut rewriter = LinkRewriter::new(&self.config, converter);
        let text = rewriter.rewrite(&raw, path, index_path)?;
        let converted = converter.convert(&text)?;

        let title = converted
            .title
            .unwrap_or_else(|| DEFAULT_INDEX_TITLE.to_string());
        let parts = PageParts {
            title: &title,
            meta_html: &converted.meta_html,
            body_html: &converted.body_html,
            navigation: "",
        };
        Ok(assemble(&parts, header, &self.config.stylesheet))
    }

    fn write_page(&self, path: &Path, html: &str, report: &mut BuildReport) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, html).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("Wrote {}", path.display());
        report.pages.push(path.to_path_buf());
        Ok(())
    }
}
