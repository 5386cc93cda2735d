//! Block operations for Notion API.

use tracing::{debug, info};

use super::{NotionClient, encode_component};
use crate::error::NotionError;
use crate::types::ChildrenPage;

impl NotionClient {
    /// Get one page of a container's direct children.
    pub(crate) fn get_block_children(
        &self,
        block_id: &str,
        start_cursor: Option<&str>,
    ) -> Result<ChildrenPage, NotionError> {
        let url = children_url(&self.base_url, block_id, self.page_size, start_cursor);

        info!("Getting children of {}", block_id);

        let page: ChildrenPage = self.get_json(&url)?;
        debug!(
            "Got {} children of {} (has_more: {})",
            page.results.len(),
            block_id,
            page.has_more
        );
        Ok(page)
    }
}

fn children_url(base_url: &str, block_id: &str, page_size: u32, start_cursor: Option<&str>) -> String {
    let mut url = format!(
        "{}/blocks/{}/children?page_size={}",
        base_url,
        encode_component(block_id),
        page_size
    );
    if let Some(cursor) = start_cursor {
        url.push_str("&start_cursor=");
        url.push_str(&encode_component(cursor));
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_url_first_page() {
        assert_eq!(
            children_url("https://api.notion.com/v1", "abc", 100, None),
            "https://api.notion.com/v1/blocks/abc/children?page_size=100"
        );
    }

    #[test]
    fn test_children_url_with_cursor() {
        assert_eq!(
            children_url("https://api.notion.com/v1", "abc", 50, Some("c/1=")),
            "https://api.notion.com/v1/blocks/abc/children?page_size=50&start_cursor=c%2F1%3D"
        );
    }

    #[test]
    fn test_children_url_keeps_hyphenated_id() {
        let url = children_url("http://x", "5d0afad8-277a-4ffa-8eea-4820700ee069", 10, None);
        assert!(url.contains("/blocks/5d0afad8-277a-4ffa-8eea-4820700ee069/children"));
    }
}
