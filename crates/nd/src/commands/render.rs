//! `nd render` command implementation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use nd_config::CliSettings;
use nd_notion::BlockSource;
use nd_renderer::{HtmlBackend, PageRenderer, RenderUnit, TocEntry, collect_toc, render_blocks};
use serde::Serialize;

use super::{CommonArgs, create_client, fetch_tree, validate_page_id, write_output};
use crate::error::CliError;
use crate::output::Output;

/// Output format of the render command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Semantic HTML.
    #[default]
    Html,
    /// Render units as JSON.
    Json,
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Notion page ID (compact or hyphenated).
    page_id: String,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Retrieve the page title and render it above the content.
    #[arg(long)]
    title: bool,

    /// Branches fetched in parallel (overrides config).
    #[arg(long)]
    concurrency: Option<usize>,

    /// Path prefix of child page links (overrides config).
    #[arg(long)]
    page_base: Option<String>,

    #[command(flatten)]
    pub(crate) common: CommonArgs,
}

/// JSON document written by `--format json`.
#[derive(Serialize)]
struct RenderDocument<'a> {
    page_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    toc: &'a [TocEntry],
    units: &'a [RenderUnit],
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, retrieval or writing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        validate_page_id(&self.page_id)?;

        let config = self.common.load_config(CliSettings {
            concurrency: self.concurrency,
            page_base: self.page_base.clone(),
            ..Default::default()
        })?;
        let client = create_client(&config)?;

        let title = if self.title {
            Some(client.retrieve_page(&self.page_id)?.title())
        } else {
            None
        };

        output.info(&format!("Fetching blocks of {}...", self.page_id));
        let blocks = fetch_tree(&client, &config, &self.page_id)?;

        let content = match self.format {
            Format::Html => {
                let mut renderer =
                    PageRenderer::<HtmlBackend>::new().with_page_base(&config.render.page_base);
                if let Some(title) = &title {
                    renderer = renderer.with_title(title);
                }
                let result = renderer.render(&blocks);
                output.warnings(&result.warnings);
                result.html
            }
            Format::Json => {
                let units = render_blocks(&blocks);
                let toc = collect_toc(&blocks);
                serde_json::to_string_pretty(&RenderDocument {
                    page_id: &self.page_id,
                    title: title.as_deref(),
                    toc: &toc,
                    units: &units,
                })?
            }
        };

        write_output(self.output.as_deref(), &content)?;
        if let Some(path) = &self.output {
            output.success(&format!("Rendered {} to {}", self.page_id, path.display()));
        }
        Ok(())
    }
}
