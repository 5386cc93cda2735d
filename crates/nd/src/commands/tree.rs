//! `nd tree` command implementation.

use std::path::PathBuf;

use clap::Args;
use nd_config::CliSettings;

use super::{CommonArgs, create_client, fetch_tree, validate_page_id, write_output};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    /// Notion page ID (compact or hyphenated).
    page_id: String,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Branches fetched in parallel (overrides config).
    #[arg(long)]
    concurrency: Option<usize>,

    #[command(flatten)]
    pub(crate) common: CommonArgs,
}

impl TreeArgs {
    /// Execute the tree command: dump the hydrated block tree as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, retrieval or writing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        validate_page_id(&self.page_id)?;

        let config = self.common.load_config(CliSettings {
            concurrency: self.concurrency,
            ..Default::default()
        })?;
        let client = create_client(&config)?;

        output.info(&format!("Fetching blocks of {}...", self.page_id));
        let blocks = fetch_tree(&client, &config, &self.page_id)?;
        let json = serde_json::to_string_pretty(&blocks)?;

        write_output(self.output.as_deref(), &json)?;
        if let Some(path) = &self.output {
            output.success(&format!(
                "Wrote {} top-level blocks to {}",
                blocks.len(),
                path.display()
            ));
        }
        Ok(())
    }
}
