//! End-to-end tests for quire-core
//!
//! Every test builds a small source tree in a temporary directory, runs a
//! [`Project`] over it and inspects the pages written to disk.
//!
//! ## Test Strategy
//!
//! 1. **Standalone**: one page per document, no navigation
//! 2. **Merge**: a single page with the combined TOC in the header
//! 3. **Book**: prev/next navigation, generated and custom indexes
//! 4. **Edge cases**: guards, missing link targets, manifests

use quire_core::{
    collect_sources, Converter, Error, NavStyle, OutputMode, Project, SiteConfig, Stylesheet,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

/// A temporary workspace with sources under `src/` and output under `out/`
struct Site {
    dir: TempDir,
}

impl Site {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn src(&self) -> PathBuf {
        self.root().join("src")
    }

    fn out(&self) -> PathBuf {
        self.root().join("out")
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.src().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn config(&self) -> SiteConfig {
        SiteConfig::new(self.src())
            .with_base_dir(self.root())
            .with_output_root(self.out())
    }

    fn run(&self, config: SiteConfig) -> quire_core::Result<quire_core::BuildReport> {
        let sources = collect_sources(&config.source_root).unwrap();
        Project::new(config, sources.files).run()
    }

    fn read(&self, path: impl AsRef<Path>) -> String {
        fs::read_to_string(self.root().join(path)).unwrap()
    }
}

fn three_chapters(site: &Site) {
    site.write("a.md", "# A\n\nFirst chapter.\n");
    site.write("b.md", "# B\n\nSecond chapter.\n");
    site.write("c.md", "# C\n\nThird chapter.\n");
}

// =============================================================================
// Standalone
// =============================================================================

#[test]
fn test_standalone_writes_one_page_per_document() {
    let site = Site::new();
    site.write("alpha.md", "# Alpha\n\nAlpha body.\n");
    site.write("sub/beta.md", "Title: Beta\n\nBeta body.\n");

    let report = site.run(site.config()).unwrap();

    assert_eq!(report.mode, OutputMode::Standalone);
    assert_eq!(
        report.pages,
        vec![site.out().join("alpha.html"), site.out().join("sub/beta.html")]
    );

    let alpha = site.read("out/alpha.html");
    assert!(alpha.contains("<title>Alpha</title>"));
    assert!(alpha.contains("<p>Alpha body.</p>"));
    assert!(!alpha.contains("Beta body"));
    assert!(!alpha.contains("<div class=\"nav\">"));

    let beta = site.read("out/sub/beta.html");
    assert!(beta.contains("<title>Beta</title>"));
    assert!(beta.contains("<header><h1 class=\"title\">Beta</h1>\n</header>"));
    assert!(beta.contains("<p>Beta body.</p>"));
}

#[test]
fn test_standalone_without_output_root_writes_beside_sources() {
    let site = Site::new();
    site.write("notes.txt", "# Notes\n");

    let config = SiteConfig::new(site.src()).with_base_dir(site.root());
    let report = site.run(config).unwrap();

    assert_eq!(report.pages, vec![site.src().join("notes.html")]);
    assert!(site.read("src/notes.html").contains("<title>Notes</title>"));
}

#[test]
fn test_flatten_discards_directories() {
    let site = Site::new();
    site.write("deep/er/page.md", "# Page\n");

    let report = site.run(site.config().with_flatten(true)).unwrap();
    assert_eq!(report.pages, vec![site.out().join("page.html")]);
}

#[test]
fn test_untitled_document_uses_output_path_as_title() {
    let site = Site::new();
    site.write("plain.md", "Nothing but text.\n");

    site.run(site.config()).unwrap();

    let expected = format!("<title>{}</title>", site.out().join("plain.html").display());
    assert!(site.read("out/plain.html").contains(&expected));
}

#[test]
fn test_header_is_shared_by_every_page() {
    let site = Site::new();
    site.write("_header.md", "Title: Handbook\n\nWelcome to the handbook.\n");
    site.write("alpha.md", "# Alpha\n");

    let report = site.run(site.config()).unwrap();
    assert_eq!(report.pages, vec![site.out().join("alpha.html")]);

    let page = site.read("out/alpha.html");
    assert!(page.contains("<title>Handbook | Alpha</title>"));
    assert!(page.contains("<section id=\"head\">"));
    assert!(page.contains("<p>Welcome to the handbook.</p>"));
}

#[test]
fn test_external_stylesheet_is_linked() {
    let site = Site::new();
    site.write("alpha.md", "# Alpha\n");

    let config = site
        .config()
        .with_stylesheet(Stylesheet::External("../style.css".to_string()));
    site.run(config).unwrap();

    let page = site.read("out/alpha.html");
    assert!(page.contains("<link rel=\"stylesheet\" href=\"../style.css\" type=\"text/css\">"));
    assert!(!page.contains("<style>"));
}

// =============================================================================
// Merge
// =============================================================================

#[test]
fn test_merge_writes_single_page_with_toc() {
    let site = Site::new();
    site.write("_header.md", "Title: Handbook\n\n[TOC_HERE]\n");
    site.write("a.md", "# A\n\n## A1\n\nText a.\n");
    site.write("b.md", "# B\n\nText b.\n");

    let report = site
        .run(site.config().with_mode(OutputMode::Merge))
        .unwrap();

    assert_eq!(report.pages, vec![site.out().join("out.html")]);
    let page = site.read("out/out.html");
    assert!(page.contains("<title>Handbook</title>"));
    assert!(!page.contains("[TOC_HERE]"));
    assert!(page.contains("<a href=\"#a\">A</a>"));
    assert!(page.contains("<a href=\"#a1\">A1</a>"));
    assert!(page.contains("<a href=\"#b\">B</a>"));
    assert_eq!(page.matches("<article>").count(), 2);
    assert!(page.find("Text a.").unwrap() < page.find("Text b.").unwrap());
}

#[test]
fn test_merge_depth_one_keeps_top_level_entries() {
    let site = Site::new();
    site.write("_header.md", "[TOC_HERE]\n");
    site.write("a.md", "# A\n\n## A1\n\n### A2\n");
    site.write("b.md", "# B\n\n## B1\n");

    let config = site.config().with_mode(OutputMode::Merge).with_toc_depth(1);
    site.run(config).unwrap();

    let page = site.read("out/out.html");
    assert!(page.contains("<a href=\"#a\">A</a>"));
    assert!(page.contains("<a href=\"#b\">B</a>"));
    assert!(!page.contains("href=\"#a1\""));
    assert!(!page.contains("href=\"#b1\""));
}

#[test]
fn test_merge_without_header_has_no_toc() {
    let site = Site::new();
    site.write("a.md", "# A\n");

    site.run(site.config().with_mode(OutputMode::Merge)).unwrap();

    let page = site.read("out/out.html");
    assert!(!page.contains("<div class=\"toc\">"));
    assert!(page.contains("<title>out</title>"));
}

#[test]
fn test_merge_keeps_anchors_unique_across_documents() {
    let site = Site::new();
    site.write("_header.md", "[TOC_HERE]\n");
    site.write("a.md", "# A\n\n## Introduction\n\nFirst.\n");
    site.write("b.md", "# B\n\n## Introduction\n\nSecond.\n");

    site.run(site.config().with_mode(OutputMode::Merge)).unwrap();

    let page = site.read("out/out.html");
    assert_eq!(page.matches("id=\"introduction\"").count(), 1);
    assert_eq!(page.matches("id=\"introduction-1\"").count(), 1);
    assert!(page.contains("<a href=\"#introduction\">Introduction</a>"));
    assert!(page.contains("<a href=\"#introduction-1\">Introduction</a>"));
}

#[test]
fn test_index_document_is_not_a_page_outside_book_mode() {
    let site = Site::new();
    site.write("_index.md", "# Contents\n\nINDEX_BODY\n");
    site.write("a.md", "# A\n");
    site.write("b.md", "# B\n");

    let merged = site.run(site.config().with_mode(OutputMode::Merge)).unwrap();
    assert_eq!(merged.pages, vec![site.out().join("out.html")]);
    let page = site.read("out/out.html");
    assert!(!page.contains("INDEX_BODY"));
    assert_eq!(page.matches("<article>").count(), 2);

    let standalone = site.run(site.config()).unwrap();
    assert_eq!(
        standalone.pages,
        vec![site.out().join("a.html"), site.out().join("b.html")]
    );
    assert!(!site.out().join("_index.html").exists());
}

// =============================================================================
// Book
// =============================================================================

#[test]
fn test_book_navigation_boundaries() {
    let site = Site::new();
    three_chapters(&site);

    let report = site.run(site.config().with_mode(OutputMode::Book)).unwrap();
    assert_eq!(
        report.pages,
        vec![
            site.out().join("a.html"),
            site.out().join("b.html"),
            site.out().join("c.html"),
            site.out().join("index.html"),
        ]
    );

    let first = site.read("out/a.html");
    assert!(first.contains(
        "<div class=\"nav\"> <a href=\"index.html\">index</a> <a href=\"b.html\">next &gt;</a></div>"
    ));

    let middle = site.read("out/b.html");
    assert!(middle.contains(
        "<div class=\"nav\"><a href=\"a.html\">&lt; prev</a> <a href=\"index.html\">index</a> <a href=\"c.html\">next &gt;</a></div>"
    ));

    let last = site.read("out/c.html");
    assert!(last.contains(
        "<div class=\"nav\"><a href=\"b.html\">&lt; prev</a> <a href=\"index.html\">index</a> </div>"
    ));
}

#[test]
fn test_book_generated_index_lists_every_page() {
    let site = Site::new();
    three_chapters(&site);

    site.run(site.config().with_mode(OutputMode::Book)).unwrap();

    let index = site.read("out/index.html");
    assert!(index.contains("<title>Index</title>"));
    assert!(index.contains(
        "<ul>\n<li><a href=\"a.html\">A</a></li>\n<li><a href=\"b.html\">B</a></li>\n<li><a href=\"c.html\">C</a></li>\n</ul>\n"
    ));
}

#[test]
fn test_book_links_across_directories() {
    let site = Site::new();
    site.write("one/a.md", "# A\n");
    site.write("two/b.md", "# B\n");

    site.run(site.config().with_mode(OutputMode::Book)).unwrap();

    let first = site.read("out/one/a.html");
    assert!(first.contains("<a href=\"../index.html\">index</a>"));
    assert!(first.contains("<a href=\"../two/b.html\">next &gt;</a>"));

    let index = site.read("out/index.html");
    assert!(index.contains("<a href=\"one/a.html\">A</a>"));
    assert!(index.contains("<a href=\"two/b.html\">B</a>"));
}

#[test]
fn test_book_navigation_with_titles() {
    let site = Site::new();
    three_chapters(&site);

    let config = site
        .config()
        .with_mode(OutputMode::Book)
        .with_nav_style(NavStyle::Titles);
    site.run(config).unwrap();

    let middle = site.read("out/b.html");
    assert!(middle.contains("<a href=\"a.html\">&lt; A</a>"));
    assert!(middle.contains("<a href=\"c.html\">C &gt;</a>"));
}

#[test]
fn test_book_custom_index_rewrites_links() {
    let site = Site::new();
    site.write("a.md", "# Alpha\n");
    site.write("b.md", "# Beta\n");
    site.write(
        "_index.md",
        "# Contents\n\n- [](a.md)\n- [Second](b.md)\n- [](missing.md)\n",
    );

    let report = site.run(site.config().with_mode(OutputMode::Book)).unwrap();
    assert_eq!(report.pages.len(), 3);
    assert!(!site.out().join("_index.html").exists());

    let index = site.read("out/index.html");
    assert!(index.contains("<title>Contents</title>"));
    assert!(index.contains("<a href=\"a.html\">Alpha</a>"));
    assert!(index.contains("<a href=\"b.html\">Second</a>"));
    assert!(index.contains("<a href=\"missing.html\">missing.md</a>"));
}

#[test]
fn test_book_custom_index_without_title() {
    let site = Site::new();
    three_chapters(&site);
    let index = site.write("contents.md", "- [](a.md)\n");

    let config = site.config().with_mode(OutputMode::Book).with_index(&index);
    let report = site.run(config).unwrap();

    assert!(!report.pages.contains(&site.out().join("contents.html")));
    assert!(site.read("out/index.html").contains("<title>Index</title>"));
}

#[test]
fn test_book_with_one_document_writes_nothing() {
    let site = Site::new();
    site.write("only.md", "# Only\n");

    let err = site
        .run(site.config().with_mode(OutputMode::Book))
        .unwrap_err();

    assert!(matches!(err, Error::Precondition(_)));
    assert!(!site.out().exists());
}

#[test]
fn test_manifest_sets_book_order() {
    let site = Site::new();
    three_chapters(&site);
    let manifest = site.write("book.list", "c.md\na.md\n");

    let sources = collect_sources(&manifest).unwrap();
    let config = SiteConfig::new(&sources.root)
        .with_base_dir(site.root())
        .with_output_root(site.out())
        .with_mode(OutputMode::Book);
    let report = Project::new(config, sources.files).run().unwrap();

    assert_eq!(
        report.pages,
        vec![
            site.out().join("c.html"),
            site.out().join("a.html"),
            site.out().join("index.html"),
        ]
    );
    assert!(site
        .read("out/c.html")
        .contains("<a href=\"a.html\">next &gt;</a>"));
}

// =============================================================================
// Conversion details
// =============================================================================

#[test]
fn test_metadata_fields_render_in_fixed_order() {
    let converted = Converter::default()
        .convert("Date: 2024-05-01\nTitle: Notes\nUnknownField: extra\nAuthor: Ann\n\nBody.\n")
        .unwrap();

    assert_eq!(
        converted.meta_html,
        "<h1 class=\"title\">Notes</h1>\n<h2 class=\"author\">Ann</h2>\n<h3 class=\"date\">2024-05-01</h3>\n<dl>\n\t<dt>unknownfield</dt>\n\t<dd>extra</dd>\n</dl>\n"
    );
    assert_eq!(converted.title.as_deref(), Some("Notes"));
}

#[test]
fn test_resolution_is_deterministic() {
    let site = Site::new();
    site.write("a.md", "# A\n");

    let first = site.run(site.config()).unwrap();
    let second = site.run(site.config()).unwrap();
    assert_eq!(first, second);
}
