//! Content source abstraction.
//!
//! The tree builder depends on [`BlockSource`], never on HTTP details, so it
//! can be driven by the real API client or by an in-memory source in tests.

use crate::client::NotionClient;
use crate::error::NotionError;
use crate::id;
use crate::types::{ChildrenPage, Page};

/// Read access to a block-structured content source.
///
/// Implementations must be `Sync`: the tree builder fetches independent
/// branches from several threads.
pub trait BlockSource: Sync {
    /// List one page of a container's direct children.
    ///
    /// `start_cursor` is the `next_cursor` of the previous page, or `None`
    /// for the first page.
    fn list_children(
        &self,
        container_id: &str,
        start_cursor: Option<&str>,
    ) -> Result<ChildrenPage, NotionError>;

    /// Retrieve a page's metadata.
    fn retrieve_page(&self, page_id: &str) -> Result<Page, NotionError>;
}

impl BlockSource for NotionClient {
    fn list_children(
        &self,
        container_id: &str,
        start_cursor: Option<&str>,
    ) -> Result<ChildrenPage, NotionError> {
        self.get_block_children(&id::hyphenate(container_id), start_cursor)
    }

    fn retrieve_page(&self, page_id: &str) -> Result<Page, NotionError> {
        self.get_page(&id::hyphenate(page_id))
    }
}
