//! CLI command implementations.

pub(crate) mod page;
pub(crate) mod render;
pub(crate) mod tree;

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use nd_config::{CliSettings, Config};
use nd_notion::{Block, NotionClient, TreeBuilder, TreeLimits, id};
use tracing::info;

use crate::error::CliError;

pub(crate) use page::PageArgs;
pub(crate) use render::RenderArgs;
pub(crate) use tree::TreeArgs;

/// Arguments shared by every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover nd.toml).
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Notion integration token (overrides config).
    #[arg(long, env = "NOTION_TOKEN", hide_env_values = true)]
    pub(crate) token: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl CommonArgs {
    /// Load configuration with CLI overrides applied.
    pub(crate) fn load_config(&self, mut settings: CliSettings) -> Result<Config, CliError> {
        settings.token.clone_from(&self.token);
        Ok(Config::load(self.config.as_deref(), Some(&settings))?)
    }
}

/// Reject page ids that are neither compact nor hyphenated.
pub(crate) fn validate_page_id(page_id: &str) -> Result<(), CliError> {
    if id::is_valid_id(page_id) {
        Ok(())
    } else {
        Err(CliError::Validation(format!(
            "invalid page id '{page_id}': expected 32 hex characters, optionally hyphenated"
        )))
    }
}

/// Create an API client from configuration.
pub(crate) fn create_client(config: &Config) -> Result<NotionClient, CliError> {
    let token = config.require_token()?;
    Ok(NotionClient::from_config(
        &config.notion.base_url,
        token,
        &config.notion.version,
        config.notion.page_size,
        config.notion.timeout_secs,
    ))
}

/// Build a page's block tree with the configured limits and concurrency.
pub(crate) fn fetch_tree(
    client: &NotionClient,
    config: &Config,
    page_id: &str,
) -> Result<Vec<Block>, CliError> {
    let limits = TreeLimits {
        max_depth: config.fetch.max_depth,
        max_blocks: config.fetch.max_blocks,
    };
    info!(
        "Fetching {} (concurrency {})",
        page_id, config.fetch.concurrency
    );
    let blocks = TreeBuilder::new(client)
        .with_limits(limits)
        .with_concurrency(config.fetch.concurrency)
        .build(page_id)?;
    Ok(blocks)
}

/// Write command output to a file, or to stdout when no path is given.
pub(crate) fn write_output(path: Option<&Path>, content: &str) -> Result<(), CliError> {
    match path {
        Some(path) => std::fs::write(path, content)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_page_id() {
        assert!(validate_page_id("5d0afad8277a4ffa8eea4820700ee069").is_ok());
        assert!(validate_page_id("5d0afad8-277a-4ffa-8eea-4820700ee069").is_ok());

        let err = validate_page_id("my-page").unwrap_err();
        assert!(err.to_string().contains("invalid page id 'my-page'"));
    }

    #[test]
    fn test_create_client_requires_token() {
        let config = Config::default();
        let err = create_client(&config)
            .err()
            .expect("create_client should fail without a token");
        assert!(matches!(err, CliError::Config(_)));
    }
}
