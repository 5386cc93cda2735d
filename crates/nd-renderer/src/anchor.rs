//! Heading anchor identifiers.

use std::sync::LazyLock;

use regex::Regex;

/// Prefix shared by all heading anchors.
pub const ANCHOR_PREFIX: &str = "heading";

static NON_SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Text made only of whitespace and punctuation (Unicode `P` or ASCII punct).
static NON_CONTENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s\p{P}[:punct:]]*$").unwrap());

/// Whether a heading with this text is rendered at all.
///
/// Headings that are empty or hold only whitespace and punctuation are
/// suppressed. Symbols and emoji count as content, so such headings are
/// kept even though their anchor slug is empty.
#[must_use]
pub fn is_visible_heading(text: &str) -> bool {
    !NON_CONTENT.is_match(text)
}

/// Derive the anchor id of a heading.
///
/// The text is lowercased, every run of characters outside `[a-z0-9]`
/// becomes a single `-`, and leading/trailing dashes are trimmed. Identical
/// headings get identical anchors.
///
/// # Examples
///
/// ```
/// use nd_renderer::heading_anchor;
///
/// assert_eq!(heading_anchor("Hello, World!"), "heading-hello-world");
/// assert_eq!(heading_anchor("  Step 2: Setup  "), "heading-step-2-setup");
/// ```
#[must_use]
pub fn heading_anchor(text: &str) -> String {
    let lowered = text.to_lowercase();
    let slug = NON_SLUG.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        ANCHOR_PREFIX.to_owned()
    } else {
        format!("{ANCHOR_PREFIX}-{slug}")
    }
}
