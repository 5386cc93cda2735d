//! Rich text spans.

use serde::{Deserialize, Serialize};

/// One fragment of rich text.
///
/// Only the fields the renderer consumes are kept; serde skips the rest
/// (annotations, mention payloads, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RichTextSpan {
    /// Text content of the fragment.
    pub plain_text: String,
    /// Link target, if the fragment is a link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl RichTextSpan {
    /// Create an unlinked span.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
            href: None,
        }
    }

    /// Create a linked span.
    #[must_use]
    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
            href: Some(href.into()),
        }
    }
}

/// Ordered sequence of rich text spans.
///
/// Span order is significant and spans are never merged or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RichText(pub Vec<RichTextSpan>);

impl RichText {
    /// Spans in source order.
    #[must_use]
    pub fn spans(&self) -> &[RichTextSpan] {
        &self.0
    }

    /// Concatenated plain text of all spans.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.0.iter().map(|span| span.plain_text.as_str()).collect()
    }

    /// True if there are no spans.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for RichText {
    fn from(text: &str) -> Self {
        Self(vec![RichTextSpan::plain(text)])
    }
}

impl From<Vec<RichTextSpan>> for RichText {
    fn from(spans: Vec<RichTextSpan>) -> Self {
        Self(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_preserves_span_order() {
        let text = RichText(vec![
            RichTextSpan::plain("b"),
            RichTextSpan::plain("a"),
            RichTextSpan::plain("b"),
        ]);
        assert_eq!(text.plain_text(), "bab");
    }

    #[test]
    fn test_deserialize_notion_span() {
        let json = r#"[
            {"type": "text", "text": {"content": "Docs", "link": {"url": "https://x.dev"}},
             "annotations": {"bold": true}, "plain_text": "Docs", "href": "https://x.dev"},
            {"type": "text", "plain_text": " here", "href": null}
        ]"#;
        let text: RichText = serde_json::from_str(json).unwrap();
        assert_eq!(
            text.spans(),
            &[
                RichTextSpan::link("Docs", "https://x.dev"),
                RichTextSpan::plain(" here")
            ]
        );
    }
}
