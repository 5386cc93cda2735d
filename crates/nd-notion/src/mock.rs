//! Mock content source for testing.
//!
//! Provides [`MockSource`] for driving the tree builder without network access.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use crate::error::NotionError;
use crate::source::BlockSource;
use crate::types::{Block, ChildrenPage, Page};

/// In-memory content source.
///
/// Children are registered per container and served in pages of
/// `page_size`, with the offset of the next page as cursor. Every
/// `list_children` call is recorded so tests can assert which containers
/// were queried.
///
/// # Example
///
/// ```ignore
/// use nd_notion::{Block, BlockKind, MockSource, TreeBuilder};
///
/// let source = MockSource::new().with_children(
///     "page",
///     vec![Block::new("a", BlockKind::paragraph("hi"))],
/// );
/// let blocks = TreeBuilder::new(&source).build("page").unwrap();
/// ```
#[derive(Debug)]
pub struct MockSource {
    children: RwLock<HashMap<String, Vec<Block>>>,
    pages: RwLock<HashMap<String, Page>>,
    failures: RwLock<HashMap<String, u16>>,
    page_size: usize,
    calls: Mutex<Vec<String>>,
}

impl Default for MockSource {
    fn default() -> Self {
        Self {
            children: RwLock::new(HashMap::new()),
            pages: RwLock::new(HashMap::new()),
            failures: RwLock::new(HashMap::new()),
            page_size: 100,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockSource {
    /// Create a new empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve children in pages of `page_size` (minimum 1).
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Register the children of a container.
    ///
    /// Nested children are registered under their parent's id and stripped
    /// from the served blocks, the way the API serves one level at a time.
    /// `has_children` is kept as given, so tests can register inconsistent
    /// flags on purpose.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_children(self, container_id: impl Into<String>, blocks: Vec<Block>) -> Self {
        self.register(container_id.into(), blocks);
        self
    }

    fn register(&self, container_id: String, blocks: Vec<Block>) {
        let mut flat = Vec::with_capacity(blocks.len());
        for mut block in blocks {
            let nested = std::mem::take(&mut block.children);
            if !nested.is_empty() {
                self.register(block.id.clone(), nested);
            }
            flat.push(block);
        }
        self.children.write().unwrap().insert(container_id, flat);
    }

    /// Register page metadata.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, page: Page) -> Self {
        self.pages.write().unwrap().insert(page.id.clone(), page);
        self
    }

    /// Make every request for `container_id` fail with `status`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(self, container_id: impl Into<String>, status: u16) -> Self {
        self.failures
            .write()
            .unwrap()
            .insert(container_id.into(), status);
        self
    }

    /// Containers queried by `list_children`, one entry per request.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of `list_children` requests for one container.
    #[must_use]
    pub fn calls_for(&self, container_id: &str) -> usize {
        self.calls().iter().filter(|id| *id == container_id).count()
    }
}

impl BlockSource for MockSource {
    fn list_children(
        &self,
        container_id: &str,
        start_cursor: Option<&str>,
    ) -> Result<ChildrenPage, NotionError> {
        self.calls.lock().unwrap().push(container_id.to_owned());

        if let Some(status) = self.failures.read().unwrap().get(container_id) {
            return Err(NotionError::HttpResponse {
                status: *status,
                code: Some("mock_failure".to_owned()),
                message: format!("mock failure for {container_id}"),
            });
        }

        let children = self.children.read().unwrap();
        let Some(all) = children.get(container_id) else {
            return Err(NotionError::HttpResponse {
                status: 404,
                code: Some("object_not_found".to_owned()),
                message: format!("Could not find block with ID: {container_id}"),
            });
        };

        let start = start_cursor
            .and_then(|cursor| cursor.parse::<usize>().ok())
            .unwrap_or(0)
            .min(all.len());
        let end = (start + self.page_size).min(all.len());
        let has_more = end < all.len();

        Ok(ChildrenPage {
            results: all[start..end].to_vec(),
            next_cursor: has_more.then(|| end.to_string()),
            has_more,
        })
    }

    fn retrieve_page(&self, page_id: &str) -> Result<Page, NotionError> {
        self.pages
            .read()
            .unwrap()
            .get(page_id)
            .cloned()
            .ok_or_else(|| NotionError::HttpResponse {
                status: 404,
                code: Some("object_not_found".to_owned()),
                message: format!("Could not find page with ID: {page_id}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BlockKind;

    fn paragraphs(n: usize) -> Vec<Block> {
        (0..n)
            .map(|i| Block::new(format!("p{i}"), BlockKind::paragraph(&i.to_string())))
            .collect()
    }

    #[test]
    fn test_pages_with_cursor() {
        let source = MockSource::new()
            .with_page_size(2)
            .with_children("root", paragraphs(3));

        let first = source.list_children("root", None).unwrap();
        assert_eq!(first.results.len(), 2);
        assert!(first.has_more);
        assert_eq!(first.next_cursor.as_deref(), Some("2"));

        let second = source.list_children("root", Some("2")).unwrap();
        assert_eq!(second.results.len(), 1);
        assert_eq!(second.results[0].id, "p2");
        assert!(!second.has_more);
        assert!(second.next_cursor.is_none());

        assert_eq!(source.calls_for("root"), 2);
    }

    #[test]
    fn test_nested_children_served_flat() {
        let source = MockSource::new().with_children(
            "root",
            vec![Block::new("t", BlockKind::Divider).with_children(paragraphs(1))],
        );

        let top = source.list_children("root", None).unwrap();
        assert!(top.results[0].has_children);
        assert!(top.results[0].children.is_empty());

        let nested = source.list_children("t", None).unwrap();
        assert_eq!(nested.results[0].id, "p0");
    }

    #[test]
    fn test_unknown_container_is_not_found() {
        let err = MockSource::new().list_children("nope", None).unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_failure_injection() {
        let source = MockSource::new()
            .with_children("root", paragraphs(1))
            .with_failure("root", 429);
        let err = source.list_children("root", None).unwrap_err();
        assert_eq!(err.status(), Some(429));
    }
}
