//! Structural renderer for Notion block trees.
//!
//! Rendering happens in two steps:
//!
//! 1. [`render_blocks`] turns a block tree into [`RenderUnit`]s, merging
//!    runs of list items into lists and table rows into tables.
//! 2. [`PageRenderer`] writes the units through a [`RenderBackend`];
//!    [`HtmlBackend`] produces semantic HTML5.
//!
//! # Example
//!
//! ```
//! use nd_notion::{Block, BlockKind, TextPayload};
//! use nd_renderer::{HtmlBackend, PageRenderer};
//!
//! let blocks = vec![
//!     Block::new("h", BlockKind::Heading1(TextPayload::plain("Hello"))),
//!     Block::new("a", BlockKind::bulleted("one")),
//!     Block::new("b", BlockKind::bulleted("two")),
//! ];
//! let result = PageRenderer::<HtmlBackend>::new().render(&blocks);
//! assert_eq!(
//!     result.html,
//!     r#"<h1 id="heading-hello">Hello</h1><ul><li>one</li><li>two</li></ul>"#
//! );
//! ```

mod anchor;
mod backend;
mod html;
mod renderer;
mod structure;
mod toc;
mod units;

pub use anchor::{ANCHOR_PREFIX, heading_anchor, is_visible_heading};
pub use backend::RenderBackend;
pub use html::{EMPTY_TOC_MESSAGE, HtmlBackend, escape_html};
pub use renderer::{DEFAULT_PAGE_BASE, PageRenderer, RenderResult};
pub use structure::{
    DEFAULT_CALLOUT_ICON, DEFAULT_CHILD_PAGE_TITLE, DEFAULT_CODE_LANGUAGE, list_marker,
    marker_style, render_block, render_blocks,
};
pub use toc::{TocEntry, collect_toc};
pub use units::{List, ListEntry, ListKind, MarkerStyle, RenderUnit, TableUnit};
