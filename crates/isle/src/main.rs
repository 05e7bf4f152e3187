//! Isle CLI - Content Island site content.
//!
//! Provides commands for:
//! - `nav`: Print the navigation tree
//! - `folder`: Print a folder by slug
//! - `item`: Print an item by slug, optionally rendered to HTML
//! - `render`: Render a local markdown file to HTML

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{FolderArgs, GlobalArgs, ItemArgs, NavArgs, RenderArgs};
use output::Output;

/// Isle - Content Island site content.
#[derive(Parser)]
#[command(name = "isle", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the navigation tree.
    Nav(NavArgs),
    /// Print a folder and its item identifiers.
    Folder(FolderArgs),
    /// Print an item.
    Item(ItemArgs),
    /// Render a markdown file to HTML.
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to ERROR
    let filter = if cli.global.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Nav(args) => args.execute(&cli.global, &output),
        Commands::Folder(args) => args.execute(&cli.global, &output),
        Commands::Item(args) => args.execute(&cli.global, &output),
        Commands::Render(args) => args.execute(&cli.global, &output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
