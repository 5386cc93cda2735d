//! Table of contents collection.

use nd_notion::{Block, BlockKind};

use crate::anchor::{heading_anchor, is_visible_heading};

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TocEntry {
    /// Heading level (1-3).
    pub level: u8,
    /// Heading text, trimmed.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// Heading level and text of a heading block.
pub(crate) fn heading_parts(kind: &BlockKind) -> Option<(u8, &nd_notion::TextPayload)> {
    match kind {
        BlockKind::Heading1(p) => Some((1, p)),
        BlockKind::Heading2(p) => Some((2, p)),
        BlockKind::Heading3(p) => Some((3, p)),
        _ => None,
    }
}

/// Collect every rendered heading of a tree, depth-first in document order.
///
/// Suppressed headings (only whitespace or punctuation) are skipped.
#[must_use]
pub fn collect_toc(blocks: &[Block]) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    collect_into(blocks, &mut entries);
    entries
}

fn collect_into(blocks: &[Block], entries: &mut Vec<TocEntry>) {
    for block in blocks {
        if let Some((level, payload)) = heading_parts(&block.kind) {
            let text = payload.rich_text.plain_text();
            if is_visible_heading(&text) {
                entries.push(TocEntry {
                    level,
                    title: text.trim().to_owned(),
                    id: heading_anchor(&text),
                });
            }
        }
        collect_into(&block.children, entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nd_notion::TextPayload;
    use pretty_assertions::assert_eq;

    fn heading(id: &str, level: u8, text: &str) -> Block {
        let payload = TextPayload::plain(text);
        let kind = match level {
            1 => BlockKind::Heading1(payload),
            2 => BlockKind::Heading2(payload),
            _ => BlockKind::Heading3(payload),
        };
        Block::new(id, kind)
    }

    #[test]
    fn test_collect_toc_in_document_order() {
        let blocks = vec![
            heading("h1", 1, " Intro "),
            Block::new("p", BlockKind::paragraph("text")),
            Block::new("t", BlockKind::Toggle(TextPayload::plain("more")))
                .with_children(vec![heading("h3", 3, "Nested")]),
            heading("h2", 2, "Usage & Setup"),
        ];

        assert_eq!(
            collect_toc(&blocks),
            vec![
                TocEntry {
                    level: 1,
                    title: "Intro".to_owned(),
                    id: "heading-intro".to_owned(),
                },
                TocEntry {
                    level: 3,
                    title: "Nested".to_owned(),
                    id: "heading-nested".to_owned(),
                },
                TocEntry {
                    level: 2,
                    title: "Usage & Setup".to_owned(),
                    id: "heading-usage-setup".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_collect_toc_skips_suppressed() {
        let blocks = vec![heading("a", 1, "   "), heading("b", 2, "~!~")];
        assert!(collect_toc(&blocks).is_empty());
    }

    #[test]
    fn test_collect_toc_keeps_emoji_heading() {
        let blocks = vec![heading("a", 2, " \u{1F680} ")];
        assert_eq!(
            collect_toc(&blocks),
            vec![TocEntry {
                level: 2,
                title: "\u{1F680}".to_owned(),
                id: "heading".to_owned(),
            }]
        );
    }
}
