//! Build command implementation

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use quire_core::{
    collect_sources, BuildReport, MarkdownExtension, NavStyle, OutputMode, Project, SiteConfig,
    Stylesheet,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Options of a build run
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Input document, directory, or `.list` manifest
    input: PathBuf,

    /// Output folder (default: next to each source)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Do not mirror the source directory structure in the output folder
    #[arg(long)]
    flatten: bool,

    /// Header document shared by every page (default: the first `_header.` file)
    #[arg(long, value_name = "FILE")]
    header: Option<PathBuf>,

    /// Book index document (default: the first `_index.` file)
    #[arg(long, value_name = "FILE", requires = "book")]
    index: Option<PathBuf>,

    /// Extra Markdown extensions (tables, footnotes, strikethrough, tasklists,
    /// smart-punctuation, heading-attributes)
    #[arg(short, long, value_name = "NAME", num_args = 1..)]
    extensions: Vec<MarkdownExtension>,

    /// Link an external stylesheet instead of embedding the default one
    #[arg(long, value_name = "HREF", conflicts_with = "serif")]
    css: Option<String>,

    /// Use the serif variant of the embedded stylesheet
    #[arg(long)]
    serif: bool,

    /// Merge all documents into a single page
    #[arg(short, long, conflicts_with = "book")]
    merge: bool,

    /// Build a book with prev/next navigation and an index
    #[arg(short, long)]
    book: bool,

    /// Depth of the merged table of contents (0 = unlimited)
    #[arg(long, value_name = "DEPTH", requires = "merge", value_parser = clap::value_parser!(u8).range(0..=5))]
    toc: Option<u8>,

    /// Label navigation links with the neighbouring page titles
    #[arg(long, requires = "book")]
    nav_titles: bool,

    /// Print a JSON build summary
    #[arg(long)]
    json: bool,
}

impl BuildArgs {
    fn mode(&self) -> OutputMode {
        if self.merge {
            OutputMode::Merge
        } else if self.book {
            OutputMode::Book
        } else {
            OutputMode::Standalone
        }
    }

    fn site_config(&self, source_root: PathBuf, base_dir: PathBuf) -> SiteConfig {
        let stylesheet = match &self.css {
            Some(href) => Stylesheet::External(href.clone()),
            None => Stylesheet::Embedded { serif: self.serif },
        };
        let nav_style = if self.nav_titles {
            NavStyle::Titles
        } else {
            NavStyle::Plain
        };

        let mut config = SiteConfig::new(source_root)
            .with_base_dir(base_dir)
            .with_flatten(self.flatten)
            .with_mode(self.mode())
            .with_toc_depth(self.toc.map(usize::from).unwrap_or(0))
            .with_nav_style(nav_style)
            .with_stylesheet(stylesheet)
            .with_extensions(self.extensions.clone());

        if let Some(output) = &self.output {
            config = config.with_output_root(output);
        }
        if let Some(header) = &self.header {
            config = config.with_header(header);
        }
        if let Some(index) = &self.index {
            config = config.with_index(index);
        }
        config
    }
}

/// JSON summary printed with `--json`
#[derive(Serialize)]
struct Summary<'a> {
    #[serde(flatten)]
    report: &'a BuildReport,
    config: &'a SiteConfig,
}

/// Convert the input documents and write the pages
pub fn build(args: &BuildArgs) -> Result<()> {
    let sources = collect_sources(&args.input)
        .with_context(|| format!("Failed to read sources from {}", args.input.display()))?;
    if sources.files.is_empty() {
        bail!("No Markdown documents found in {}", args.input.display());
    }

    let base_dir = std::env::current_dir().context("Could not determine working directory")?;
    let config = args.site_config(sources.root, base_dir);
    tracing::debug!("Building {} documents with {:?}", sources.files.len(), config);

    // Set up progress spinner
    let pb = if args.json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Converting {} documents...", sources.files.len()));

    let project = Project::new(config, sources.files);
    let result = project.run();
    pb.finish_and_clear();
    let report = result.context("Build failed")?;

    if args.json {
        let summary = Summary {
            report: &report,
            config: project.config(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Wrote {} page(s)", report.pages.len());
    }

    Ok(())
}
