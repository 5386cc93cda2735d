//! HTML backend for page rendering.
//!
//! Produces semantic HTML5 output suitable for web display.

use std::fmt::Write;

use nd_notion::RichText;

use crate::backend::RenderBackend;
use crate::toc::TocEntry;
use crate::units::{ListKind, TableUnit};

/// Message shown in place of an empty table of contents.
pub const EMPTY_TOC_MESSAGE: &str = "No headings found in this page.";

/// HTML render backend.
///
/// Produces semantic HTML5 with:
/// - `<details>`/`<summary>` for toggles
/// - `<pre><code>` for code blocks
/// - `<figure>` for images with captions
/// - `<nav>` for the table of contents
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn rich_text(text: &RichText, out: &mut String) {
        for span in text.spans() {
            match span.href.as_deref() {
                Some(href) => write!(
                    out,
                    r#"<a href="{}">{}</a>"#,
                    escape_html(href),
                    escape_html(&span.plain_text)
                )
                .unwrap(),
                None => out.push_str(&escape_html(&span.plain_text)),
            }
        }
    }

    fn page_title(title: &str, out: &mut String) {
        write!(out, r#"<h1 class="page-title">{}</h1>"#, escape_html(title)).unwrap();
    }

    fn paragraph_start(out: &mut String) {
        out.push_str("<p>");
    }

    fn paragraph_end(out: &mut String) {
        out.push_str("</p>");
    }

    fn heading(level: u8, anchor: &str, text: &RichText, out: &mut String) {
        write!(out, r#"<h{level} id="{}">"#, escape_html(anchor)).unwrap();
        Self::rich_text(text, out);
        write!(out, "</h{level}>").unwrap();
    }

    fn to_do_start(checked: bool, out: &mut String) {
        if checked {
            out.push_str(
                r#"<div class="to-do checked"><input type="checkbox" checked disabled> <s>"#,
            );
        } else {
            out.push_str(r#"<div class="to-do"><input type="checkbox" disabled> <span>"#);
        }
    }

    fn to_do_end(checked: bool, out: &mut String) {
        out.push_str(if checked { "</s></div>" } else { "</span></div>" });
    }

    fn code_block(language: &str, content: &str, out: &mut String) {
        let language = escape_html(language);
        write!(
            out,
            r#"<div class="code-block"><div class="code-language">{language}</div><pre><code class="language-{language}">{}</code></pre></div>"#,
            escape_html(content)
        )
        .unwrap();
    }

    fn blockquote_start(out: &mut String) {
        out.push_str("<blockquote>");
    }

    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    fn callout_start(icon: &str, out: &mut String) {
        write!(
            out,
            r#"<div class="callout"><span class="callout-icon">{}</span><div class="callout-content">"#,
            escape_html(icon)
        )
        .unwrap();
    }

    fn callout_end(out: &mut String) {
        out.push_str("</div></div>");
    }

    fn image(url: &str, caption: &RichText, out: &mut String) {
        write!(
            out,
            r#"<figure><img src="{}" alt="{}">"#,
            escape_html(url),
            escape_html(&caption.plain_text())
        )
        .unwrap();
        if !caption.is_empty() {
            out.push_str("<figcaption>");
            Self::rich_text(caption, out);
            out.push_str("</figcaption>");
        }
        out.push_str("</figure>");
    }

    fn table(table: &TableUnit, out: &mut String) {
        out.push_str("<table>");
        if let Some(header) = &table.header {
            out.push_str("<thead><tr>");
            for cell in header {
                out.push_str("<th>");
                Self::rich_text(cell, out);
                out.push_str("</th>");
            }
            out.push_str("</tr></thead>");
        }
        if !table.rows.is_empty() {
            out.push_str("<tbody>");
            for row in &table.rows {
                out.push_str("<tr>");
                for cell in row {
                    out.push_str("<td>");
                    Self::rich_text(cell, out);
                    out.push_str("</td>");
                }
                out.push_str("</tr>");
            }
            out.push_str("</tbody>");
        }
        out.push_str("</table>");
    }

    fn toggle_start(summary: &RichText, out: &mut String) {
        out.push_str(r#"<details class="toggle"><summary>"#);
        Self::rich_text(summary, out);
        out.push_str("</summary>");
    }

    fn toggle_end(out: &mut String) {
        out.push_str("</details>");
    }

    fn child_page(href: &str, title: &str, out: &mut String) {
        write!(
            out,
            r#"<div class="child-page"><a href="{}">📄 {}</a></div>"#,
            escape_html(href),
            escape_html(title)
        )
        .unwrap();
    }

    fn columns_start(count: usize, out: &mut String) {
        write!(out, r#"<div class="columns columns-{count}">"#).unwrap();
    }

    fn columns_end(out: &mut String) {
        out.push_str("</div>");
    }

    fn column_start(out: &mut String) {
        out.push_str(r#"<div class="column">"#);
    }

    fn column_end(out: &mut String) {
        out.push_str("</div>");
    }

    fn list_start(kind: ListKind, out: &mut String) {
        out.push_str(match kind {
            ListKind::Bulleted => "<ul>",
            ListKind::Numbered => "<ol>",
        });
    }

    fn list_end(kind: ListKind, out: &mut String) {
        out.push_str(match kind {
            ListKind::Bulleted => "</ul>",
            ListKind::Numbered => "</ol>",
        });
    }

    fn list_item_start(marker: Option<&str>, out: &mut String) {
        match marker {
            Some(marker) => write!(
                out,
                r#"<li><span class="list-marker">{}.</span> "#,
                escape_html(marker)
            )
            .unwrap(),
            None => out.push_str("<li>"),
        }
    }

    fn list_item_end(out: &mut String) {
        out.push_str("</li>");
    }

    fn nested_start(out: &mut String) {
        out.push_str(r#"<div class="nested">"#);
    }

    fn nested_end(out: &mut String) {
        out.push_str("</div>");
    }

    fn table_of_contents(entries: &[TocEntry], out: &mut String) {
        if entries.is_empty() {
            write!(out, r#"<p class="toc-empty">{EMPTY_TOC_MESSAGE}</p>"#).unwrap();
            return;
        }
        out.push_str(r#"<nav class="table-of-contents"><ul>"#);
        for entry in entries {
            write!(
                out,
                r##"<li class="toc-level-{}"><a href="#{}">{}</a></li>"##,
                entry.level,
                escape_html(&entry.id),
                escape_html(&entry.title)
            )
            .unwrap();
        }
        out.push_str("</ul></nav>");
    }

    fn unsupported(block_type: &str, out: &mut String) {
        write!(
            out,
            r#"<div class="unsupported">Unsupported block type: {}</div>"#,
            escape_html(block_type)
        )
        .unwrap();
    }
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
