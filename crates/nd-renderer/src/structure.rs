//! Structural rendering of block trees.
//!
//! [`render_blocks`] scans a sibling sequence left to right, merging runs of
//! same-typed list items into one [`List`] and dispatching every other block
//! to its formatter. Children are rendered with the same contract, so a list
//! inside a toggle or a table inside a column comes out right.
//!
//! Rendering never fails: missing or malformed optional data degrades to an
//! empty value or no unit for that block.

use nd_notion::{Block, BlockKind, RichText, Table, id};
use tracing::warn;

use crate::anchor::{heading_anchor, is_visible_heading};
use crate::toc::heading_parts;
use crate::units::{List, ListEntry, ListKind, MarkerStyle, RenderUnit, TableUnit};

/// Icon used for callouts without an emoji.
pub const DEFAULT_CALLOUT_ICON: &str = "💡";

/// Label used for code blocks without a language.
pub const DEFAULT_CODE_LANGUAGE: &str = "code";

/// Title used for child pages without one.
pub const DEFAULT_CHILD_PAGE_TITLE: &str = "Untitled";

/// Cues in a numbered list's first item that switch markers to letters.
const LETTER_CUES: [&str; 4] = ["letter", "alphabet", "a)", "b)"];

/// Render an ordered sibling sequence into render units.
///
/// # Examples
///
/// ```
/// use nd_notion::{Block, BlockKind};
/// use nd_renderer::{RenderUnit, render_blocks};
///
/// let blocks = vec![
///     Block::new("1", BlockKind::bulleted("A")),
///     Block::new("2", BlockKind::bulleted("B")),
///     Block::new("3", BlockKind::paragraph("after")),
/// ];
/// let units = render_blocks(&blocks);
/// assert_eq!(units.len(), 2);
/// assert!(matches!(&units[0], RenderUnit::List(list) if list.entries.len() == 2));
/// ```
#[must_use]
pub fn render_blocks(blocks: &[Block]) -> Vec<RenderUnit> {
    let mut units = Vec::with_capacity(blocks.len());
    let mut cursor = 0;

    while cursor < blocks.len() {
        if let Some(kind) = list_kind(&blocks[cursor].kind) {
            let run = blocks[cursor..]
                .iter()
                .take_while(|b| list_kind(&b.kind) == Some(kind))
                .count();
            units.push(RenderUnit::List(render_list(kind, &blocks[cursor..cursor + run])));
            cursor += run;
        } else {
            units.extend(render_block(&blocks[cursor]));
            cursor += 1;
        }
    }

    units
}

/// Format a single non-list block.
///
/// Returns `None` for blocks that produce no unit: suppressed headings,
/// images without a URL, empty tables and stray table rows.
#[must_use]
pub fn render_block(block: &Block) -> Option<RenderUnit> {
    let unit = match &block.kind {
        BlockKind::Paragraph(p) => RenderUnit::Paragraph {
            text: p.rich_text.clone(),
            children: render_blocks(&block.children),
        },
        BlockKind::Heading1(_) | BlockKind::Heading2(_) | BlockKind::Heading3(_) => {
            let (level, payload) = heading_parts(&block.kind)?;
            let text = payload.rich_text.plain_text();
            if !is_visible_heading(&text) {
                return None;
            }
            RenderUnit::Heading {
                level,
                text: payload.rich_text.clone(),
                anchor: heading_anchor(&text),
            }
        }
        BlockKind::ToDo(todo) => RenderUnit::ToDo {
            text: todo.rich_text.clone(),
            checked: todo.checked,
            children: render_blocks(&block.children),
        },
        BlockKind::Code(code) => RenderUnit::Code {
            language: code
                .language
                .as_deref()
                .filter(|lang| !lang.trim().is_empty())
                .unwrap_or(DEFAULT_CODE_LANGUAGE)
                .to_owned(),
            text: code.rich_text.plain_text(),
        },
        BlockKind::Quote(p) => RenderUnit::Quote {
            text: p.rich_text.clone(),
            children: render_blocks(&block.children),
        },
        BlockKind::Divider => RenderUnit::Divider,
        BlockKind::Callout(callout) => RenderUnit::Callout {
            icon: callout
                .icon
                .as_ref()
                .and_then(|icon| icon.emoji.as_deref())
                .filter(|emoji| !emoji.is_empty())
                .unwrap_or(DEFAULT_CALLOUT_ICON)
                .to_owned(),
            text: callout.rich_text.clone(),
            children: render_blocks(&block.children),
        },
        BlockKind::Image(image) => RenderUnit::Image {
            url: image.source.url()?.to_owned(),
            caption: image.caption.clone(),
        },
        BlockKind::Table(table) => RenderUnit::Table(render_table(table, &block.children)?),
        BlockKind::TableRow(_) => return None,
        BlockKind::Toggle(p) => RenderUnit::Toggle {
            summary: p.rich_text.clone(),
            children: render_blocks(&block.children),
        },
        BlockKind::ChildPage(page) => RenderUnit::ChildPage {
            title: if page.title.trim().is_empty() {
                DEFAULT_CHILD_PAGE_TITLE.to_owned()
            } else {
                page.title.clone()
            },
            page_id: id::compact(&block.id),
        },
        BlockKind::ColumnList => RenderUnit::Columns {
            columns: block
                .children
                .iter()
                .map(|column| render_blocks(&column.children))
                .collect(),
        },
        // A column outside a column list still renders as one column.
        BlockKind::Column => RenderUnit::Columns {
            columns: vec![render_blocks(&block.children)],
        },
        BlockKind::TableOfContents => RenderUnit::TableOfContents,
        BlockKind::BulletedListItem(_) | BlockKind::NumberedListItem(_) => {
            let kind = list_kind(&block.kind)?;
            RenderUnit::List(render_list(kind, std::slice::from_ref(block)))
        }
        BlockKind::Unsupported { block_type, .. } => {
            warn!("Unsupported block type {} in block {}", block_type, block.id);
            RenderUnit::Unsupported {
                block_type: block_type.clone(),
            }
        }
    };
    Some(unit)
}

fn list_kind(kind: &BlockKind) -> Option<ListKind> {
    match kind {
        BlockKind::BulletedListItem(_) => Some(ListKind::Bulleted),
        BlockKind::NumberedListItem(_) => Some(ListKind::Numbered),
        _ => None,
    }
}

fn list_text(kind: &BlockKind) -> Option<&RichText> {
    match kind {
        BlockKind::BulletedListItem(p) | BlockKind::NumberedListItem(p) => Some(&p.rich_text),
        _ => None,
    }
}

/// Build one list from a run of same-typed items.
fn render_list(kind: ListKind, run: &[Block]) -> List {
    let style = match kind {
        ListKind::Bulleted => None,
        ListKind::Numbered => Some(
            run.first()
                .and_then(|first| list_text(&first.kind))
                .map_or(MarkerStyle::Decimal, |text| marker_style(&text.plain_text())),
        ),
    };

    let entries = run
        .iter()
        .enumerate()
        .map(|(index, block)| ListEntry {
            marker: style.map(|style| list_marker(index + 1, style)),
            text: list_text(&block.kind).cloned().unwrap_or_default(),
            children: render_blocks(&block.children),
        })
        .collect();

    List { kind, entries }
}

/// Pick the marker style of a numbered list from its first item's text.
///
/// Letters are used when the text mentions `letter` or `alphabet`, or
/// contains `a)` or `b)`, case-insensitively.
#[must_use]
pub fn marker_style(first_item_text: &str) -> MarkerStyle {
    let lowered = first_item_text.to_lowercase();
    if LETTER_CUES.iter().any(|cue| lowered.contains(cue)) {
        MarkerStyle::Letter
    } else {
        MarkerStyle::Decimal
    }
}

/// Marker of the `position`-th item (1-based).
///
/// Letter markers are bijective base-26: `a … z, aa, ab, … zz, aaa`.
///
/// # Examples
///
/// ```
/// use nd_renderer::{MarkerStyle, list_marker};
///
/// assert_eq!(list_marker(3, MarkerStyle::Decimal), "3");
/// assert_eq!(list_marker(1, MarkerStyle::Letter), "a");
/// assert_eq!(list_marker(27, MarkerStyle::Letter), "aa");
/// ```
#[must_use]
pub fn list_marker(position: usize, style: MarkerStyle) -> String {
    match style {
        MarkerStyle::Decimal => position.to_string(),
        MarkerStyle::Letter => {
            let mut letters = Vec::new();
            let mut n = position;
            while n > 0 {
                n -= 1;
                letters.push(b'a' + u8::try_from(n % 26).unwrap_or(0));
                n /= 26;
            }
            letters.iter().rev().map(|&b| char::from(b)).collect()
        }
    }
}

/// Split table rows into header and body.
fn render_table(table: &Table, children: &[Block]) -> Option<TableUnit> {
    let mut rows: Vec<Vec<RichText>> = children
        .iter()
        .filter_map(|child| match &child.kind {
            BlockKind::TableRow(row) => Some(row.cells.clone()),
            _ => None,
        })
        .collect();

    if rows.is_empty() {
        return None;
    }

    let header = if table.has_column_header {
        Some(rows.remove(0))
    } else {
        None
    };
    Some(TableUnit { header, rows })
}
