//! Bookwatch CLI - subnav generation.
//!
//! Provides commands for:
//! - `subnav`: Write subnav partials, props and PDF configs for a book
//! - `links`: Print a product's navigation tree as JSON

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{LinksArgs, SubnavArgs};
use output::Output;

/// Bookwatch - navigation for multi-repository documentation books.
#[derive(Parser)]
#[command(name = "bw", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate subnavs for every product (or one) of a book.
    Subnav(SubnavArgs),
    /// Print a product's navigation tree as JSON.
    Links(LinksArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Subnav(args) => args.book.verbose,
        Commands::Links(args) => args.book.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Subnav(args) => args.execute(),
        Commands::Links(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
