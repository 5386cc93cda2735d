//! Notion identifier formats.
//!
//! Notion URLs carry ids as 32 hex characters, the API returns them in the
//! hyphenated 8-4-4-4-12 form. Conversion only inserts or removes hyphens;
//! case and characters are preserved so both directions round-trip.

/// Lengths of the hyphen-separated groups.
const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

/// Length of the compact form.
const COMPACT_LEN: usize = 32;

/// Check whether `id` is a compact or hyphenated identifier.
///
/// # Examples
///
/// ```
/// use nd_notion::id::is_valid_id;
///
/// assert!(is_valid_id("5d0afad8277a4ffa8eea4820700ee069"));
/// assert!(is_valid_id("5d0afad8-277a-4ffa-8eea-4820700ee069"));
/// assert!(!is_valid_id("invalid"));
/// ```
#[must_use]
pub fn is_valid_id(id: &str) -> bool {
    is_compact(id) || is_hyphenated(id)
}

fn is_compact(id: &str) -> bool {
    id.len() == COMPACT_LEN && id.bytes().all(|b| b.is_ascii_hexdigit())
}

fn is_hyphenated(id: &str) -> bool {
    let groups: Vec<&str> = id.split('-').collect();
    groups.len() == GROUPS.len()
        && groups
            .iter()
            .zip(GROUPS)
            .all(|(group, len)| group.len() == len && group.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// Convert a compact id to the hyphenated form used by the API.
///
/// Ids that are not compact (already hyphenated, or malformed) are returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use nd_notion::id::hyphenate;
///
/// assert_eq!(
///     hyphenate("5d0afad8277a4ffa8eea4820700ee069"),
///     "5d0afad8-277a-4ffa-8eea-4820700ee069"
/// );
/// ```
#[must_use]
pub fn hyphenate(id: &str) -> String {
    if !is_compact(id) {
        return id.to_owned();
    }

    let mut out = String::with_capacity(COMPACT_LEN + GROUPS.len() - 1);
    let mut start = 0;
    for (i, len) in GROUPS.into_iter().enumerate() {
        if i > 0 {
            out.push('-');
        }
        out.push_str(&id[start..start + len]);
        start += len;
    }
    out
}

/// Strip hyphens, giving the compact form used in page URLs.
#[must_use]
pub fn compact(id: &str) -> String {
    id.replace('-', "")
}
