//! Error types for Notion retrieval.

/// Error from Notion API operations.
#[derive(Debug, thiserror::Error)]
pub enum NotionError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {message}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Notion error code (e.g. `object_not_found`), when the body carried one.
        code: Option<String>,
        /// Error message or raw response body.
        message: String,
    },

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NotionError {
    /// HTTP status of a response error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpResponse { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error while assembling a page's block tree.
///
/// Any failure aborts the whole build; no partial tree is returned.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TreeError {
    /// Listing children of a container failed.
    #[error("failed to retrieve children of {container_id}: {source}")]
    Retrieval {
        /// Container whose children could not be listed.
        container_id: String,
        /// Underlying API error.
        #[source]
        source: NotionError,
    },

    /// Content is nested deeper than the configured limit.
    #[error("content too large: nesting under {container_id} exceeds {max_depth} levels")]
    TooDeep {
        /// Container whose children would exceed the limit.
        container_id: String,
        /// Configured depth limit.
        max_depth: usize,
    },

    /// Content has more blocks than the configured limit.
    #[error("content too large: more than {max_blocks} blocks")]
    TooManyBlocks {
        /// Configured block limit.
        max_blocks: usize,
    },

    /// The fetch thread pool could not be created.
    #[error("failed to create fetch thread pool: {0}")]
    ThreadPool(String),
}

impl TreeError {
    /// True for the "content too large" conditions.
    #[must_use]
    pub fn is_too_large(&self) -> bool {
        matches!(self, Self::TooDeep { .. } | Self::TooManyBlocks { .. })
    }
}
