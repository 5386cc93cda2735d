//! `nd page` command implementation.

use clap::Args;
use nd_config::CliSettings;
use nd_notion::{BlockSource, Page};

use super::{CommonArgs, create_client, validate_page_id};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the page command.
#[derive(Args)]
pub(crate) struct PageArgs {
    /// Notion page ID (compact or hyphenated).
    page_id: String,

    #[command(flatten)]
    pub(crate) common: CommonArgs,
}

impl PageArgs {
    /// Execute the page command: print page metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or retrieval fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        validate_page_id(&self.page_id)?;

        let config = self.common.load_config(CliSettings::default())?;
        let client = create_client(&config)?;
        let page = client.retrieve_page(&self.page_id)?;

        print_page(&output, &page);
        Ok(())
    }
}

fn print_page(output: &Output, page: &Page) {
    output.title(&page.title());
    output.field("ID", &page.id);
    if !page.url.is_empty() {
        output.field("URL", &page.url);
    }
    output.field("Created", &page.created_time);
    output.field("Last edited", &page.last_edited_time);
    if let Some(emoji) = page.icon.as_ref().and_then(|icon| icon.emoji.as_deref()) {
        output.field("Icon", emoji);
    }
    if let Some(cover) = page.cover.as_ref().and_then(|cover| cover.url()) {
        output.field("Cover", cover);
    }
}
