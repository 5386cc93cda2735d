//! nd CLI - Notion page renderer.
//!
//! Provides commands for:
//! - `render`: Fetch a page's block tree and render it to HTML or JSON
//! - `tree`: Dump a page's hydrated block tree as JSON
//! - `page`: Show page metadata

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{PageArgs, RenderArgs, TreeArgs};
use output::Output;

/// nd - Render Notion pages.
#[derive(Parser)]
#[command(name = "nd", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a page to HTML or JSON render units.
    Render(RenderArgs),
    /// Dump a page's block tree as JSON.
    Tree(TreeArgs),
    /// Show page metadata.
    Page(PageArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Render(args) => args.common.verbose,
            Self::Tree(args) => args.common.verbose,
            Self::Page(args) => args.common.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Tree(args) => args.execute(),
        Commands::Page(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from([
            "nd",
            "render",
            "5d0afad8277a4ffa8eea4820700ee069",
            "-o",
            "out.html",
            "--format",
            "json",
            "--title",
            "-v",
        ])
        .unwrap();
        assert!(cli.command.verbose());
        assert!(matches!(cli.command, Commands::Render(_)));
    }

    #[test]
    fn test_parse_page_requires_id() {
        assert!(Cli::try_parse_from(["nd", "page"]).is_err());
    }
}
