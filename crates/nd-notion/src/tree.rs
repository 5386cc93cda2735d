//! Block tree assembly.
//!
//! The API serves a container's children one level at a time, in pages.
//! [`TreeBuilder`] follows pagination cursors for each container and
//! recurses into every child that reports `has_children`, producing an
//! owned tree per page.
//!
//! - Pages of one container are fetched sequentially (each request needs the
//!   previous cursor).
//! - Independent branches may be fetched in parallel on a dedicated rayon
//!   pool; results are merged in sibling order.
//! - The build is all-or-nothing: the first failure at any depth aborts it.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::TreeError;
use crate::id;
use crate::source::BlockSource;
use crate::types::Block;

/// Guards against pathological content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeLimits {
    /// Maximum nesting depth; a page's direct children are at depth 1.
    pub max_depth: usize,
    /// Maximum number of blocks in one tree.
    pub max_blocks: usize,
}

impl Default for TreeLimits {
    fn default() -> Self {
        Self {
            max_depth: 32,
            max_blocks: 10_000,
        }
    }
}

/// Builds hydrated block trees from a [`BlockSource`].
pub struct TreeBuilder<'a, S: BlockSource> {
    source: &'a S,
    limits: TreeLimits,
    concurrency: usize,
}

impl<'a, S: BlockSource> TreeBuilder<'a, S> {
    /// Create a sequential builder with default limits.
    #[must_use]
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            limits: TreeLimits::default(),
            concurrency: 1,
        }
    }

    /// Set depth and size limits.
    #[must_use]
    pub fn with_limits(mut self, limits: TreeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Fetch up to `concurrency` branches in parallel (minimum 1).
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Build the tree under a container.
    ///
    /// Returns the container's direct children in source order, each with
    /// its subtree attached.
    ///
    /// # Errors
    ///
    /// - [`TreeError::Retrieval`] if any child listing fails
    /// - [`TreeError::TooDeep`] / [`TreeError::TooManyBlocks`] if a limit is exceeded
    /// - [`TreeError::ThreadPool`] if the fetch pool cannot be created
    pub fn build(&self, container_id: &str) -> Result<Vec<Block>, TreeError> {
        let root = id::hyphenate(container_id);
        let count = AtomicUsize::new(0);

        let blocks = if self.concurrency > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.concurrency)
                .thread_name(|i| format!("nd-fetch-{i}"))
                .build()
                .map_err(|e| TreeError::ThreadPool(e.to_string()))?;
            pool.install(|| self.build_level(&root, 1, &count, true))?
        } else {
            self.build_level(&root, 1, &count, false)?
        };

        info!(
            "Built tree for {} ({} blocks, {} top-level)",
            root,
            count.load(Ordering::Relaxed),
            blocks.len()
        );
        Ok(blocks)
    }

    /// List all direct children of a container, following pagination.
    ///
    /// Pages are concatenated in the order they were returned. Pagination
    /// ends at a response claiming more pages without a cursor, at an empty
    /// page, or at a cursor already seen for this container.
    ///
    /// # Errors
    ///
    /// - [`TreeError::Retrieval`] if any page request fails
    /// - [`TreeError::TooManyBlocks`] as soon as the listed children exceed the limit
    pub fn list_all_children(&self, container_id: &str) -> Result<Vec<Block>, TreeError> {
        self.list_counted(container_id, &AtomicUsize::new(0))
    }

    /// Paginate one container, adding every page to the tree-wide `count`.
    fn list_counted(
        &self,
        container_id: &str,
        count: &AtomicUsize,
    ) -> Result<Vec<Block>, TreeError> {
        let mut blocks = Vec::new();
        let mut cursor: Option<String> = None;
        let mut seen_cursors = HashSet::new();
        let mut pages = 0usize;

        loop {
            let page = self
                .source
                .list_children(container_id, cursor.as_deref())
                .map_err(|source| TreeError::Retrieval {
                    container_id: container_id.to_owned(),
                    source,
                })?;
            pages += 1;

            let listed = page.results.len();
            let total = count.fetch_add(listed, Ordering::Relaxed) + listed;
            if total > self.limits.max_blocks {
                return Err(TreeError::TooManyBlocks {
                    max_blocks: self.limits.max_blocks,
                });
            }
            blocks.extend(page.results);

            match page.next_cursor {
                Some(next) if page.has_more && listed > 0 => {
                    if !seen_cursors.insert(next.clone()) {
                        warn!(
                            "Cursor {} repeated for {}, stopping pagination",
                            next, container_id
                        );
                        break;
                    }
                    cursor = Some(next);
                }
                _ => break,
            }
        }

        debug!(
            "Listed {} children of {} in {} page(s)",
            blocks.len(),
            container_id,
            pages
        );
        Ok(blocks)
    }

    fn build_level(
        &self,
        container_id: &str,
        depth: usize,
        count: &AtomicUsize,
        parallel: bool,
    ) -> Result<Vec<Block>, TreeError> {
        if depth > self.limits.max_depth {
            return Err(TreeError::TooDeep {
                container_id: container_id.to_owned(),
                max_depth: self.limits.max_depth,
            });
        }

        let children = self.list_counted(container_id, count)?;

        let attach = |mut block: Block| -> Result<Block, TreeError> {
            if block.has_children {
                block.children = self.build_level(&block.id, depth + 1, count, parallel)?;
                block.has_children = !block.children.is_empty();
            }
            Ok(block)
        };

        let branches = children.iter().filter(|b| b.has_children).count();
        if parallel && branches > 1 {
            children.into_par_iter().map(attach).collect()
        } else {
            children.into_iter().map(attach).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSource;
    use crate::types::{BlockKind, Table, TableRow, TextPayload};
    use pretty_assertions::assert_eq;

    fn para(id: &str, text: &str) -> Block {
        Block::new(id, BlockKind::paragraph(text))
    }

    fn toggle(id: &str, children: Vec<Block>) -> Block {
        Block::new(id, BlockKind::Toggle(TextPayload::plain(id))).with_children(children)
    }

    fn ids(blocks: &[Block]) -> Vec<&str> {
        blocks.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_pagination_concatenates_in_order() {
        let blocks: Vec<Block> = (0..7).map(|i| para(&format!("b{i}"), "x")).collect();
        for page_size in [1, 2, 3, 7, 100] {
            let source = MockSource::new()
                .with_page_size(page_size)
                .with_children("page", blocks.clone());

            let tree = TreeBuilder::new(&source).build("page").unwrap();

            assert_eq!(
                ids(&tree),
                vec!["b0", "b1", "b2", "b3", "b4", "b5", "b6"],
                "page size {page_size}"
            );
            assert_eq!(source.calls_for("page"), 7_usize.div_ceil(page_size));
        }
    }

    #[test]
    fn test_nested_children_attached() {
        let source = MockSource::new().with_children(
            "page",
            vec![
                para("a", "top"),
                toggle("t", vec![para("t1", "inner"), toggle("t2", vec![para("t2a", "deep")])]),
            ],
        );

        let tree = TreeBuilder::new(&source).build("page").unwrap();

        assert_eq!(ids(&tree), vec!["a", "t"]);
        assert!(tree[1].has_children);
        assert_eq!(ids(&tree[1].children), vec!["t1", "t2"]);
        assert_eq!(ids(&tree[1].children[1].children), vec!["t2a"]);
    }

    #[test]
    fn test_no_request_for_childless_blocks() {
        let source = MockSource::new().with_children(
            "page",
            vec![para("a", "x"), toggle("t", vec![para("t1", "y")]), para("b", "z")],
        );

        TreeBuilder::new(&source).build("page").unwrap();

        assert_eq!(source.calls(), vec!["page".to_owned(), "t".to_owned()]);
        assert_eq!(source.calls_for("a"), 0);
        assert_eq!(source.calls_for("t1"), 0);
    }

    #[test]
    fn test_paginated_nested_children() {
        let rows: Vec<Block> = (0..5)
            .map(|i| {
                Block::new(
                    format!("r{i}"),
                    BlockKind::TableRow(TableRow {
                        cells: vec!["c".into()],
                    }),
                )
            })
            .collect();
        let table = Block::new("tbl", BlockKind::Table(Table::default())).with_children(rows);
        let source = MockSource::new()
            .with_page_size(2)
            .with_children("page", vec![table]);

        let tree = TreeBuilder::new(&source).build("page").unwrap();

        assert_eq!(ids(&tree[0].children), vec!["r0", "r1", "r2", "r3", "r4"]);
        assert_eq!(source.calls_for("tbl"), 3);
    }

    #[test]
    fn test_has_children_without_results_is_cleared() {
        let mut flagged = para("a", "x");
        flagged.has_children = true;
        let source = MockSource::new()
            .with_children("page", vec![flagged])
            .with_children("a", Vec::new());

        let tree = TreeBuilder::new(&source).build("page").unwrap();

        assert!(!tree[0].has_children);
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn test_compact_root_id_is_hyphenated() {
        let source = MockSource::new().with_children(
            "5d0afad8-277a-4ffa-8eea-4820700ee069",
            vec![para("a", "x")],
        );

        let tree = TreeBuilder::new(&source)
            .build("5d0afad8277a4ffa8eea4820700ee069")
            .unwrap();

        assert_eq!(ids(&tree), vec!["a"]);
    }

    #[test]
    fn test_failure_at_depth_aborts_build() {
        let source = MockSource::new()
            .with_children(
                "page",
                vec![para("a", "x"), toggle("t", vec![toggle("deep", vec![para("d", "y")])])],
            )
            .with_failure("deep", 500);

        let err = TreeBuilder::new(&source).build("page").unwrap_err();

        match err {
            TreeError::Retrieval {
                container_id,
                source,
            } => {
                assert_eq!(container_id, "deep");
                assert_eq!(source.status(), Some(500));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_root_failure() {
        let source = MockSource::new();
        let err = TreeBuilder::new(&source).build("missing").unwrap_err();
        assert!(matches!(err, TreeError::Retrieval { ref container_id, .. } if container_id == "missing"));
        assert!(!err.is_too_large());
    }

    #[test]
    fn test_max_depth() {
        let source = MockSource::new().with_children(
            "page",
            vec![toggle("l1", vec![toggle("l2", vec![para("l3", "x")])])],
        );

        let limits = TreeLimits {
            max_depth: 3,
            ..TreeLimits::default()
        };
        assert!(TreeBuilder::new(&source).with_limits(limits).build("page").is_ok());

        let limits = TreeLimits {
            max_depth: 2,
            ..TreeLimits::default()
        };
        let err = TreeBuilder::new(&source)
            .with_limits(limits)
            .build("page")
            .unwrap_err();
        assert!(err.is_too_large());
        assert!(matches!(err, TreeError::TooDeep { ref container_id, max_depth: 2 } if container_id == "l2"));
    }

    #[test]
    fn test_max_blocks() {
        let source = MockSource::new().with_children(
            "page",
            vec![para("a", "x"), toggle("t", vec![para("t1", "y"), para("t2", "z")])],
        );

        let limits = TreeLimits {
            max_blocks: 4,
            ..TreeLimits::default()
        };
        assert!(TreeBuilder::new(&source).with_limits(limits).build("page").is_ok());

        let limits = TreeLimits {
            max_blocks: 3,
            ..TreeLimits::default()
        };
        let err = TreeBuilder::new(&source)
            .with_limits(limits)
            .build("page")
            .unwrap_err();
        assert!(matches!(err, TreeError::TooManyBlocks { max_blocks: 3 }));
        assert!(err.to_string().contains("content too large"));
    }

    #[test]
    fn test_parallel_build_matches_sequential() {
        let branches: Vec<Block> = (0..12)
            .map(|i| {
                let leaves = (0..4).map(|j| para(&format!("b{i}-{j}"), "leaf")).collect();
                toggle(&format!("b{i}"), vec![toggle(&format!("b{i}-inner"), leaves)])
            })
            .collect();
        let source = MockSource::new()
            .with_page_size(5)
            .with_children("page", branches);

        let sequential = TreeBuilder::new(&source).build("page").unwrap();
        let parallel = TreeBuilder::new(&source)
            .with_concurrency(4)
            .build("page")
            .unwrap();

        assert_eq!(parallel, sequential);
        assert_eq!(parallel.len(), 12);
        assert_eq!(parallel[11].children[0].children.len(), 4);
    }

    #[test]
    fn test_parallel_failure_aborts_build() {
        let branches: Vec<Block> = (0..6)
            .map(|i| toggle(&format!("b{i}"), vec![para(&format!("b{i}-0"), "x")]))
            .collect();
        let source = MockSource::new()
            .with_children("page", branches)
            .with_failure("b3", 403);

        let err = TreeBuilder::new(&source)
            .with_concurrency(3)
            .build("page")
            .unwrap_err();

        assert!(matches!(err, TreeError::Retrieval { ref container_id, .. } if container_id == "b3"));
    }

    #[test]
    fn test_list_all_children_stops_without_cursor() {
        struct Endless;

        impl BlockSource for Endless {
            fn list_children(
                &self,
                _container_id: &str,
                _start_cursor: Option<&str>,
            ) -> Result<crate::types::ChildrenPage, crate::error::NotionError> {
                Ok(crate::types::ChildrenPage {
                    results: vec![Block::new("x", BlockKind::Divider)],
                    next_cursor: None,
                    has_more: true,
                })
            }

            fn retrieve_page(
                &self,
                _page_id: &str,
            ) -> Result<crate::types::Page, crate::error::NotionError> {
                Ok(crate::types::Page::default())
            }
        }

        let blocks = TreeBuilder::new(&Endless).list_all_children("page").unwrap();
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn test_max_blocks_stops_pagination_early() {
        let dividers: Vec<Block> = (0..50)
            .map(|i| Block::new(format!("d{i}"), BlockKind::Divider))
            .collect();
        let source = MockSource::new()
            .with_page_size(1)
            .with_children("page", dividers);

        let limits = TreeLimits {
            max_blocks: 3,
            ..TreeLimits::default()
        };
        let err = TreeBuilder::new(&source)
            .with_limits(limits)
            .build("page")
            .unwrap_err();

        assert!(matches!(err, TreeError::TooManyBlocks { max_blocks: 3 }));
        assert_eq!(source.calls_for("page"), 4);
    }

    #[test]
    fn test_list_all_children_stops_on_repeated_cursor() {
        #[derive(Default)]
        struct Looping {
            requests: AtomicUsize,
        }

        impl BlockSource for Looping {
            fn list_children(
                &self,
                _container_id: &str,
                _start_cursor: Option<&str>,
            ) -> Result<crate::types::ChildrenPage, crate::error::NotionError> {
                let n = self.requests.fetch_add(1, Ordering::Relaxed);
                Ok(crate::types::ChildrenPage {
                    results: vec![Block::new(format!("x{n}"), BlockKind::Divider)],
                    next_cursor: Some("same".to_owned()),
                    has_more: true,
                })
            }

            fn retrieve_page(
                &self,
                _page_id: &str,
            ) -> Result<crate::types::Page, crate::error::NotionError> {
                Ok(crate::types::Page::default())
            }
        }

        let source = Looping::default();
        let blocks = TreeBuilder::new(&source).list_all_children("page").unwrap();

        assert_eq!(ids(&blocks), vec!["x0", "x1"]);
        assert_eq!(source.requests.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_list_all_children_stops_on_empty_page() {
        struct Hollow;

        impl BlockSource for Hollow {
            fn list_children(
                &self,
                _container_id: &str,
                _start_cursor: Option<&str>,
            ) -> Result<crate::types::ChildrenPage, crate::error::NotionError> {
                Ok(crate::types::ChildrenPage {
                    results: Vec::new(),
                    next_cursor: Some("next".to_owned()),
                    has_more: true,
                })
            }

            fn retrieve_page(
                &self,
                _page_id: &str,
            ) -> Result<crate::types::Page, crate::error::NotionError> {
                Ok(crate::types::Page::default())
            }
        }

        let blocks = TreeBuilder::new(&Hollow).list_all_children("page").unwrap();
        assert!(blocks.is_empty());
    }
}
