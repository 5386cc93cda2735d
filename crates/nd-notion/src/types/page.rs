//! Notion page metadata.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{FileObject, Icon, RichText};

/// Page object returned by `GET /pages/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Page {
    /// Page ID (hyphenated).
    pub id: String,
    /// Public Notion URL.
    pub url: String,
    /// Creation timestamp (ISO 8601).
    pub created_time: String,
    /// Last edit timestamp (ISO 8601).
    pub last_edited_time: String,
    /// Page icon.
    pub icon: Option<Icon>,
    /// Cover image.
    pub cover: Option<FileObject>,
    /// Page properties keyed by property name.
    pub properties: Map<String, Value>,
}

/// The `title` property shape.
#[derive(Deserialize)]
struct TitleProperty {
    #[serde(default)]
    title: RichText,
}

impl Page {
    /// Page title from its `title` property.
    ///
    /// Falls back to `Untitled Page (<id prefix>)` when the page has no
    /// non-empty title property.
    #[must_use]
    pub fn title(&self) -> String {
        self.properties
            .values()
            .filter(|value| value.get("type").and_then(Value::as_str) == Some("title"))
            .filter_map(|value| serde_json::from_value::<TitleProperty>(value.clone()).ok())
            .map(|prop| prop.title.plain_text())
            .find(|title| !title.is_empty())
            .unwrap_or_else(|| {
                let prefix: String = self.id.chars().take(8).collect();
                format!("Untitled Page ({prefix})")
            })
    }
}
