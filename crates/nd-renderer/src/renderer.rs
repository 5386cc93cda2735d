//! Page renderer with pluggable backend.

use std::marker::PhantomData;

use nd_notion::Block;

use crate::backend::RenderBackend;
use crate::structure::render_blocks;
use crate::toc::{TocEntry, collect_toc};
use crate::units::{List, RenderUnit};

/// Default path prefix of child page links.
pub const DEFAULT_PAGE_BASE: &str = "/page";

/// Result of rendering a page.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered content.
    pub html: String,
    /// Page title, if one was supplied.
    pub title: Option<String>,
    /// Table of contents entries.
    pub toc: Vec<TocEntry>,
    /// Warnings generated during rendering (e.g., unsupported block types).
    pub warnings: Vec<String>,
}

/// Page renderer with pluggable backend.
///
/// Runs structural rendering over a block tree, then writes every render
/// unit through the [`RenderBackend`].
///
/// # Example
///
/// ```
/// use nd_notion::{Block, BlockKind};
/// use nd_renderer::{HtmlBackend, PageRenderer};
///
/// let blocks = vec![Block::new("p", BlockKind::paragraph("Hello"))];
/// let result = PageRenderer::<HtmlBackend>::new().render(&blocks);
/// assert_eq!(result.html, "<p>Hello</p>");
/// ```
pub struct PageRenderer<B: RenderBackend> {
    page_base: String,
    title: Option<String>,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> Default for PageRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: RenderBackend> PageRenderer<B> {
    /// Create a renderer with the default page base and no title.
    #[must_use]
    pub fn new() -> Self {
        Self {
            page_base: DEFAULT_PAGE_BASE.to_owned(),
            title: None,
            _backend: PhantomData,
        }
    }

    /// Set the path prefix of child page links.
    #[must_use]
    pub fn with_page_base(mut self, base: impl Into<String>) -> Self {
        self.page_base = base.into();
        self
    }

    /// Render a title above the content and report it in the result.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Render a page's block tree.
    #[must_use]
    pub fn render(&self, blocks: &[Block]) -> RenderResult {
        let units = render_blocks(blocks);
        let toc = collect_toc(blocks);
        self.render_units(&units, toc)
    }

    /// Write already structured units.
    ///
    /// `toc` fills every table of contents placeholder.
    #[must_use]
    pub fn render_units(&self, units: &[RenderUnit], toc: Vec<TocEntry>) -> RenderResult {
        let mut pass = Pass {
            page_base: self.page_base.trim_end_matches('/'),
            toc: &toc,
            output: String::with_capacity(4096),
            warnings: Vec::new(),
            _backend: PhantomData::<B>,
        };

        if let Some(title) = &self.title {
            B::page_title(title, &mut pass.output);
        }
        pass.units(units);

        let Pass {
            output, warnings, ..
        } = pass;
        RenderResult {
            html: output,
            title: self.title.clone(),
            toc,
            warnings,
        }
    }
}

/// State of one rendering pass.
struct Pass<'a, B: RenderBackend> {
    page_base: &'a str,
    toc: &'a [TocEntry],
    output: String,
    warnings: Vec<String>,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> Pass<'_, B> {
    fn units(&mut self, units: &[RenderUnit]) {
        for unit in units {
            self.unit(unit);
        }
    }

    fn nested(&mut self, children: &[RenderUnit]) {
        if children.is_empty() {
            return;
        }
        B::nested_start(&mut self.output);
        self.units(children);
        B::nested_end(&mut self.output);
    }

    fn unit(&mut self, unit: &RenderUnit) {
        match unit {
            RenderUnit::Paragraph { text, children } => {
                B::paragraph_start(&mut self.output);
                B::rich_text(text, &mut self.output);
                B::paragraph_end(&mut self.output);
                self.nested(children);
            }
            RenderUnit::Heading {
                level,
                text,
                anchor,
            } => B::heading(*level, anchor, text, &mut self.output),
            RenderUnit::ToDo {
                text,
                checked,
                children,
            } => {
                B::to_do_start(*checked, &mut self.output);
                B::rich_text(text, &mut self.output);
                B::to_do_end(*checked, &mut self.output);
                self.nested(children);
            }
            RenderUnit::Code { language, text } => B::code_block(language, text, &mut self.output),
            RenderUnit::Quote { text, children } => {
                B::blockquote_start(&mut self.output);
                B::rich_text(text, &mut self.output);
                self.units(children);
                B::blockquote_end(&mut self.output);
            }
            RenderUnit::Divider => B::horizontal_rule(&mut self.output),
            RenderUnit::Callout {
                icon,
                text,
                children,
            } => {
                B::callout_start(icon, &mut self.output);
                B::rich_text(text, &mut self.output);
                self.units(children);
                B::callout_end(&mut self.output);
            }
            RenderUnit::Image { url, caption } => B::image(url, caption, &mut self.output),
            RenderUnit::Table(table) => B::table(table, &mut self.output),
            RenderUnit::Toggle { summary, children } => {
                B::toggle_start(summary, &mut self.output);
                self.units(children);
                B::toggle_end(&mut self.output);
            }
            RenderUnit::ChildPage { title, page_id } => {
                let href = format!("{}/{page_id}", self.page_base);
                B::child_page(&href, title, &mut self.output);
            }
            RenderUnit::Columns { columns } => {
                B::columns_start(columns.len(), &mut self.output);
                for column in columns {
                    B::column_start(&mut self.output);
                    self.units(column);
                    B::column_end(&mut self.output);
                }
                B::columns_end(&mut self.output);
            }
            RenderUnit::List(list) => self.list(list),
            RenderUnit::TableOfContents => B::table_of_contents(self.toc, &mut self.output),
            RenderUnit::Unsupported { block_type } => {
                self.warnings
                    .push(format!("Unsupported block type: {block_type}"));
                B::unsupported(block_type, &mut self.output);
            }
        }
    }

    fn list(&mut self, list: &List) {
        B::list_start(list.kind, &mut self.output);
        for entry in &list.entries {
            B::list_item_start(entry.marker.as_deref(), &mut self.output);
            B::rich_text(&entry.text, &mut self.output);
            self.units(&entry.children);
            B::list_item_end(&mut self.output);
        }
        B::list_end(list.kind, &mut self.output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HtmlBackend;
    use nd_notion::{BlockKind, ChildPage, Table, TableRow, TextPayload, ToDo};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn render(blocks: &[Block]) -> RenderResult {
        PageRenderer::<HtmlBackend>::new().render(blocks)
    }

    #[test]
    fn test_page_scenario_html() {
        let blocks = vec![
            Block::new("h", BlockKind::Heading1(TextPayload::plain("Intro"))),
            Block::new("p", BlockKind::paragraph("hi")),
            Block::new("a", BlockKind::bulleted("A")),
            Block::new("b", BlockKind::bulleted("B")),
            Block::new("toc", BlockKind::TableOfContents),
        ];

        let result = render(&blocks);

        assert_eq!(
            result.html,
            concat!(
                r#"<h1 id="heading-intro">Intro</h1>"#,
                "<p>hi</p>",
                "<ul><li>A</li><li>B</li></ul>",
                r##"<nav class="table-of-contents"><ul><li class="toc-level-1"><a href="#heading-intro">Intro</a></li></ul></nav>"##,
            )
        );
        assert_eq!(result.toc.len(), 1);
        assert!(result.warnings.is_empty());
        assert!(result.title.is_none());
    }

    #[test]
    fn test_numbered_letters_html() {
        let blocks = vec![
            Block::new("1", BlockKind::numbered("Pick a) or b)")),
            Block::new("2", BlockKind::numbered("second")),
        ];

        let result = render(&blocks);

        assert_eq!(
            result.html,
            concat!(
                r#"<ol><li><span class="list-marker">a.</span> Pick a) or b)</li>"#,
                r#"<li><span class="list-marker">b.</span> second</li></ol>"#,
            )
        );
    }

    #[test]
    fn test_toggle_with_nested_list() {
        let toggle = Block::new("t", BlockKind::Toggle(TextPayload::plain("Details")))
            .with_children(vec![Block::new("a", BlockKind::bulleted("inner"))]);

        let result = render(&[toggle]);

        assert_eq!(
            result.html,
            r#"<details class="toggle"><summary>Details</summary><ul><li>inner</li></ul></details>"#
        );
    }

    #[test]
    fn test_paragraph_children_nested() {
        let para = Block::new("p", BlockKind::paragraph("parent"))
            .with_children(vec![Block::new("c", BlockKind::paragraph("child"))]);

        let result = render(&[para]);

        assert_eq!(
            result.html,
            r#"<p>parent</p><div class="nested"><p>child</p></div>"#
        );
    }

    #[test]
    fn test_child_page_link_uses_page_base() {
        let page = Block::new(
            "5d0afad8-277a-4ffa-8eea-4820700ee069",
            BlockKind::ChildPage(ChildPage {
                title: "Notes".to_owned(),
            }),
        );

        let default_base = render(std::slice::from_ref(&page));
        assert_eq!(
            default_base.html,
            r#"<div class="child-page"><a href="/page/5d0afad8277a4ffa8eea4820700ee069">📄 Notes</a></div>"#
        );

        let custom = PageRenderer::<HtmlBackend>::new()
            .with_page_base("/docs/")
            .render(&[page]);
        assert!(custom.html.contains(r#"href="/docs/5d0afad8277a4ffa8eea4820700ee069""#));
    }

    #[test]
    fn test_table_html() {
        let rows = ["h", "a", "b"]
            .iter()
            .map(|c| {
                Block::new(
                    *c,
                    BlockKind::TableRow(TableRow {
                        cells: vec![(*c).into()],
                    }),
                )
            })
            .collect();
        let table = Block::new(
            "t",
            BlockKind::Table(Table {
                table_width: 1,
                has_column_header: true,
                has_row_header: false,
            }),
        )
        .with_children(rows);

        let result = render(&[table]);

        assert_eq!(
            result.html,
            "<table><thead><tr><th>h</th></tr></thead><tbody><tr><td>a</td></tr><tr><td>b</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_unsupported_adds_warning() {
        let blocks = vec![
            Block::new(
                "u",
                BlockKind::Unsupported {
                    block_type: "embed".to_owned(),
                    payload: json!({"url": "https://example.com"}),
                },
            ),
            Block::new("p", BlockKind::paragraph("after")),
        ];

        let result = render(&blocks);

        assert_eq!(
            result.html,
            r#"<div class="unsupported">Unsupported block type: embed</div><p>after</p>"#
        );
        assert_eq!(result.warnings, vec!["Unsupported block type: embed"]);
    }

    #[test]
    fn test_title_rendered_first() {
        let result = PageRenderer::<HtmlBackend>::new()
            .with_title("Roadmap & Plans")
            .render(&[Block::new("d", BlockKind::Divider)]);

        assert_eq!(
            result.html,
            r#"<h1 class="page-title">Roadmap &amp; Plans</h1><hr>"#
        );
        assert_eq!(result.title.as_deref(), Some("Roadmap & Plans"));
    }

    #[test]
    fn test_to_do_items() {
        let blocks = vec![
            Block::new(
                "1",
                BlockKind::ToDo(ToDo {
                    rich_text: "open".into(),
                    checked: false,
                }),
            ),
            Block::new(
                "2",
                BlockKind::ToDo(ToDo {
                    rich_text: "done".into(),
                    checked: true,
                }),
            ),
        ];

        let result = render(&blocks);

        assert_eq!(
            result.html,
            concat!(
                r#"<div class="to-do"><input type="checkbox" disabled> <span>open</span></div>"#,
                r#"<div class="to-do checked"><input type="checkbox" checked disabled> <s>done</s></div>"#,
            )
        );
    }

    #[test]
    fn test_empty_page() {
        let result = render(&[]);
        assert_eq!(result.html, "");
        assert!(result.toc.is_empty());
    }
}
