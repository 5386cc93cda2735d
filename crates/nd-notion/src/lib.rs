//! Notion API client and block tree builder.
//!
//! This crate retrieves a page's content from the Notion REST API and
//! assembles it into an owned tree of [`Block`]s, ready for rendering.
//!
//! # Architecture
//!
//! - [`NotionClient`]: sync HTTP client (bearer auth, `Notion-Version` header)
//! - [`BlockSource`]: the seam between tree assembly and HTTP, implemented by
//!   the client and by [`MockSource`] (feature `mock`)
//! - [`TreeBuilder`]: follows pagination and recursion, optionally fetching
//!   independent branches in parallel
//!
//! # Example
//!
//! ```no_run
//! use nd_notion::{NotionClient, TreeBuilder};
//!
//! let client = NotionClient::new("secret_token");
//! let blocks = TreeBuilder::new(&client)
//!     .with_concurrency(4)
//!     .build("5d0afad8277a4ffa8eea4820700ee069")?;
//! println!("{} top-level blocks", blocks.len());
//! # Ok::<(), nd_notion::TreeError>(())
//! ```

mod client;
mod error;
pub mod id;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod source;
mod tree;
mod types;

pub use client::{DEFAULT_BASE_URL, DEFAULT_VERSION, NotionClient};
pub use error::{NotionError, TreeError};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSource;
pub use source::BlockSource;
pub use tree::{TreeBuilder, TreeLimits};
pub use types::{
    ApiErrorBody, Block, BlockKind, Callout, ChildPage, ChildrenPage, Code, FileObject, FileRef,
    Icon, Image, Page, RichText, RichTextSpan, Table, TableRow, TextPayload, ToDo,
};
