//! Notion REST API client.
//!
//! Provides a sync HTTP client for the public Notion API with bearer-token
//! authentication.

mod blocks;
mod pages;

use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::Agent;

use crate::error::NotionError;
use crate::types::ApiErrorBody;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";

/// Default `Notion-Version` header value.
pub const DEFAULT_VERSION: &str = "2022-06-28";

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Largest page size the API accepts.
const MAX_PAGE_SIZE: u32 = 100;

/// Characters escaped in path segments and query values (RFC 3986 unreserved are kept).
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Notion REST API client.
pub struct NotionClient {
    agent: Agent,
    base_url: String,
    token: String,
    version: String,
    page_size: u32,
}

impl NotionClient {
    /// Create a client for the public API with default settings.
    #[must_use]
    pub fn new(token: &str) -> Self {
        Self::from_config(
            DEFAULT_BASE_URL,
            token,
            DEFAULT_VERSION,
            MAX_PAGE_SIZE,
            DEFAULT_TIMEOUT,
        )
    }

    /// Create client from config values.
    ///
    /// # Arguments
    /// * `base_url` - API base URL, e.g. `https://api.notion.com/v1`
    /// * `token` - Integration token
    /// * `version` - `Notion-Version` header value
    /// * `page_size` - Children per request, clamped to 1..=100
    /// * `timeout_secs` - Global request timeout
    #[must_use]
    pub fn from_config(
        base_url: &str,
        token: &str,
        version: &str,
        page_size: u32,
        timeout_secs: u64,
    ) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: token.to_owned(),
            version: version.to_owned(),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Children requested per page.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Issue an authenticated GET and decode the JSON body.
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, NotionError> {
        debug!("GET {}", url);

        let response = self
            .agent
            .get(url)
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("Notion-Version", &self.version)
            .header("Accept", "application/json")
            .call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(response_error(status, &error_body));
        }

        let body = body_reader.read_to_string()?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Build an error from a non-2xx response, decoding Notion's error body when possible.
fn response_error(status: u16, body: &str) -> NotionError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(api) if !api.message.is_empty() => NotionError::HttpResponse {
            status,
            code: api.code,
            message: api.message,
        },
        _ => NotionError::HttpResponse {
            status,
            code: None,
            message: body.to_owned(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(NotionClient: Send, Sync);

    #[test]
    fn test_from_config_trims_base_url() {
        let client = NotionClient::from_config("http://localhost:9000/v1/", "t", "v", 100, 5);
        assert_eq!(client.base_url, "http://localhost:9000/v1");
    }

    #[test]
    fn test_page_size_clamped() {
        assert_eq!(NotionClient::from_config(DEFAULT_BASE_URL, "t", "v", 0, 5).page_size(), 1);
        assert_eq!(NotionClient::from_config(DEFAULT_BASE_URL, "t", "v", 500, 5).page_size(), 100);
        assert_eq!(NotionClient::new("t").page_size(), 100);
    }

    #[test]
    fn test_response_error_decodes_notion_body() {
        let err = response_error(
            404,
            r#"{"object":"error","status":404,"code":"object_not_found","message":"Could not find block"}"#,
        );
        match err {
            NotionError::HttpResponse {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 404);
                assert_eq!(code.as_deref(), Some("object_not_found"));
                assert_eq!(message, "Could not find block");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_response_error_keeps_raw_body() {
        let err = response_error(502, "Bad Gateway");
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.to_string(), "HTTP error: 502 - Bad Gateway");
    }
}
