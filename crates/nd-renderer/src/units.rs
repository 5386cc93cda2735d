//! Render units produced by structural rendering.
//!
//! A render unit is one structural item of a page: a paragraph, a whole
//! list, a whole table, a disclosure with its nested units. Presentation
//! layers consume units without looking at blocks again.

use nd_notion::RichText;

/// One structural item of a rendered page.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "unit", rename_all = "snake_case"))]
pub enum RenderUnit {
    /// Paragraph; empty text is a valid empty paragraph.
    Paragraph {
        text: RichText,
        children: Vec<RenderUnit>,
    },
    /// Heading with its anchor id.
    Heading {
        /// 1, 2 or 3.
        level: u8,
        text: RichText,
        anchor: String,
    },
    /// Checkbox item.
    ToDo {
        text: RichText,
        checked: bool,
        children: Vec<RenderUnit>,
    },
    /// Literal code block.
    Code {
        /// Language label (`code` when the block has none).
        language: String,
        text: String,
    },
    /// Quotation container.
    Quote {
        text: RichText,
        children: Vec<RenderUnit>,
    },
    /// Horizontal separator.
    Divider,
    /// Text with an icon glyph.
    Callout {
        icon: String,
        text: RichText,
        children: Vec<RenderUnit>,
    },
    /// Image with a resolved URL.
    Image { url: String, caption: RichText },
    /// Table with optional header row.
    Table(TableUnit),
    /// Disclosure: summary text with hidden children.
    Toggle {
        summary: RichText,
        children: Vec<RenderUnit>,
    },
    /// Link to a nested page.
    ChildPage {
        title: String,
        /// Page id without separators.
        page_id: String,
    },
    /// Side-by-side columns, each an independent unit sequence.
    Columns { columns: Vec<Vec<RenderUnit>> },
    /// A merged run of list items.
    List(List),
    /// Placeholder filled with the page's table of contents.
    TableOfContents,
    /// Visible placeholder for an unrecognized block type.
    Unsupported { block_type: String },
}

/// List flavour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ListKind {
    Bulleted,
    Numbered,
}

/// Marker style of a numbered list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MarkerStyle {
    /// `1, 2, 3, …`
    Decimal,
    /// `a, b, …, z, aa, ab, …`
    Letter,
}

/// A list container built from a run of same-typed list items.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct List {
    pub kind: ListKind,
    pub entries: Vec<ListEntry>,
}

/// One list item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListEntry {
    /// Marker text without punctuation (`1`, `b`); `None` for bullets.
    pub marker: Option<String>,
    pub text: RichText,
    /// Rendering of the item's nested blocks.
    pub children: Vec<RenderUnit>,
}

/// A table split into header and body rows.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableUnit {
    /// First row, when the table declares a column header.
    pub header: Option<Vec<RichText>>,
    pub rows: Vec<Vec<RichText>>,
}

impl TableUnit {
    /// Number of rows, header included.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len() + usize::from(self.header.is_some())
    }
}
