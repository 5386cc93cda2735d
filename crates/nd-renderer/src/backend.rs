//! Render backend trait for format-specific output.
//!
//! [`PageRenderer`](crate::PageRenderer) walks render units and handles
//! nesting; the backend decides how each unit looks. Container units are
//! split into `*_start`/`*_end` pairs so nested units can be written between
//! them.

use nd_notion::RichText;

use crate::toc::TocEntry;
use crate::units::{ListKind, TableUnit};

/// Backend trait for format-specific rendering operations.
pub trait RenderBackend {
    /// Render rich text spans in order.
    fn rich_text(text: &RichText, out: &mut String);

    /// Render the page title shown above the content.
    fn page_title(title: &str, out: &mut String);

    /// Render paragraph start tag.
    fn paragraph_start(out: &mut String);

    /// Render paragraph end tag.
    fn paragraph_end(out: &mut String);

    /// Render a heading.
    fn heading(level: u8, anchor: &str, text: &RichText, out: &mut String);

    /// Render a checkbox item start; text follows.
    fn to_do_start(checked: bool, out: &mut String);

    /// Render a checkbox item end.
    fn to_do_end(checked: bool, out: &mut String);

    /// Render a literal code block.
    fn code_block(language: &str, content: &str, out: &mut String);

    /// Render blockquote start tag.
    fn blockquote_start(out: &mut String);

    /// Render blockquote end tag.
    fn blockquote_end(out: &mut String);

    /// Render a horizontal rule.
    ///
    /// Default uses `<hr>`.
    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }

    /// Render a callout start with its icon; text follows.
    fn callout_start(icon: &str, out: &mut String);

    /// Render callout end.
    fn callout_end(out: &mut String);

    /// Render an image with an optional caption.
    fn image(url: &str, caption: &RichText, out: &mut String);

    /// Render a whole table.
    fn table(table: &TableUnit, out: &mut String);

    /// Render a disclosure start with its summary; children follow.
    fn toggle_start(summary: &RichText, out: &mut String);

    /// Render disclosure end.
    fn toggle_end(out: &mut String);

    /// Render a link to a nested page.
    fn child_page(href: &str, title: &str, out: &mut String);

    /// Render columns container start.
    fn columns_start(count: usize, out: &mut String);

    /// Render columns container end.
    fn columns_end(out: &mut String);

    /// Render one column start.
    fn column_start(out: &mut String);

    /// Render one column end.
    fn column_end(out: &mut String);

    /// Render list start.
    fn list_start(kind: ListKind, out: &mut String);

    /// Render list end.
    fn list_end(kind: ListKind, out: &mut String);

    /// Render list item start; `marker` is `None` for bullets.
    fn list_item_start(marker: Option<&str>, out: &mut String);

    /// Render list item end.
    fn list_item_end(out: &mut String);

    /// Render start of blocks nested under a paragraph or checkbox item.
    fn nested_start(out: &mut String);

    /// Render end of nested blocks.
    fn nested_end(out: &mut String);

    /// Render the table of contents in place of its placeholder.
    fn table_of_contents(entries: &[TocEntry], out: &mut String);

    /// Render a visible placeholder for an unrecognized block type.
    fn unsupported(block_type: &str, out: &mut String);
}
