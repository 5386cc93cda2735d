//! Paginated list and error response types.

use serde::{Deserialize, Serialize};

use super::Block;

/// One page of a block's children.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChildrenPage {
    /// Child blocks in source order. Their own children are not included.
    #[serde(default)]
    pub results: Vec<Block>,
    /// Cursor for the next page, if any.
    #[serde(default)]
    pub next_cursor: Option<String>,
    /// Whether more pages follow.
    #[serde(default)]
    pub has_more: bool,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable code, e.g. `object_not_found`.
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}
