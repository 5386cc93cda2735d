//! Page operations for Notion API.

use tracing::info;

use super::{NotionClient, encode_component};
use crate::error::NotionError;
use crate::types::Page;

impl NotionClient {
    /// Get page metadata by ID.
    pub(crate) fn get_page(&self, page_id: &str) -> Result<Page, NotionError> {
        let url = format!("{}/pages/{}", self.base_url, encode_component(page_id));

        info!("Getting page {}", page_id);

        let page: Page = self.get_json(&url)?;
        info!("Got page {} ({})", page_id, page.title());
        Ok(page)
    }
}
