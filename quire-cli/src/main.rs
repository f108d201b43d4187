//! Quire CLI - Convert Markdown documents into linked HTML pages

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "quire")]
#[command(author, version, about = "Convert Markdown documents into linked HTML pages", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(flatten)]
    build: commands::BuildArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "quire_cli=debug,quire_core=debug"
    } else {
        "quire_cli=info,quire_core=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    commands::build(&cli.build)
}
