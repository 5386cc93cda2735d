//! Notion block types.
//!
//! The API encodes a block as a flat object whose `type` field names the
//! key holding the type-specific payload:
//!
//! ```json
//! {"id": "…", "type": "to_do", "has_children": false,
//!  "to_do": {"rich_text": […], "checked": true}}
//! ```
//!
//! Decoding never fails on a bad payload. A payload that does not match the
//! expected shape decodes to the variant's empty default, and unknown type
//! tags decode to [`BlockKind::Unsupported`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::RichText;

/// One node of a page's content tree.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(from = "RawBlock", into = "RawBlock")]
pub struct Block {
    /// Block identifier (hyphenated UUID).
    pub id: String,
    /// Whether the block owns child blocks.
    pub has_children: bool,
    /// Type-specific payload.
    pub kind: BlockKind,
    /// Child blocks, populated by the tree builder.
    pub children: Vec<Block>,
}

impl Block {
    /// Create a childless block.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            has_children: false,
            kind,
            children: Vec::new(),
        }
    }

    /// Attach children, keeping `has_children` in sync.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.has_children = !children.is_empty();
        self.children = children;
        self
    }

    /// The API type tag of this block.
    #[must_use]
    pub fn block_type(&self) -> &str {
        self.kind.type_tag()
    }
}

/// Type-specific block payload.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Paragraph(TextPayload),
    Heading1(TextPayload),
    Heading2(TextPayload),
    Heading3(TextPayload),
    ToDo(ToDo),
    Code(Code),
    Quote(TextPayload),
    Divider,
    Callout(Callout),
    Image(Image),
    Table(Table),
    TableRow(TableRow),
    BulletedListItem(TextPayload),
    NumberedListItem(TextPayload),
    Toggle(TextPayload),
    ChildPage(ChildPage),
    ColumnList,
    Column,
    TableOfContents,
    /// A block type this crate does not model.
    Unsupported {
        /// The API type tag.
        block_type: String,
        /// Raw payload, kept for JSON dumps.
        payload: Value,
    },
}

impl BlockKind {
    /// The API type tag for this kind.
    #[must_use]
    pub fn type_tag(&self) -> &str {
        match self {
            Self::Paragraph(_) => "paragraph",
            Self::Heading1(_) => "heading_1",
            Self::Heading2(_) => "heading_2",
            Self::Heading3(_) => "heading_3",
            Self::ToDo(_) => "to_do",
            Self::Code(_) => "code",
            Self::Quote(_) => "quote",
            Self::Divider => "divider",
            Self::Callout(_) => "callout",
            Self::Image(_) => "image",
            Self::Table(_) => "table",
            Self::TableRow(_) => "table_row",
            Self::BulletedListItem(_) => "bulleted_list_item",
            Self::NumberedListItem(_) => "numbered_list_item",
            Self::Toggle(_) => "toggle",
            Self::ChildPage(_) => "child_page",
            Self::ColumnList => "column_list",
            Self::Column => "column",
            Self::TableOfContents => "table_of_contents",
            Self::Unsupported { block_type, .. } => block_type,
        }
    }

    /// Paragraph with plain text.
    #[must_use]
    pub fn paragraph(text: &str) -> Self {
        Self::Paragraph(TextPayload::plain(text))
    }

    /// Bulleted list item with plain text.
    #[must_use]
    pub fn bulleted(text: &str) -> Self {
        Self::BulletedListItem(TextPayload::plain(text))
    }

    /// Numbered list item with plain text.
    #[must_use]
    pub fn numbered(text: &str) -> Self {
        Self::NumberedListItem(TextPayload::plain(text))
    }

    fn decode(id: &str, tag: &str, payload: Option<Value>) -> Self {
        match tag {
            "paragraph" => Self::Paragraph(decode_payload(id, tag, payload)),
            "heading_1" => Self::Heading1(decode_payload(id, tag, payload)),
            "heading_2" => Self::Heading2(decode_payload(id, tag, payload)),
            "heading_3" => Self::Heading3(decode_payload(id, tag, payload)),
            "to_do" => Self::ToDo(decode_payload(id, tag, payload)),
            "code" => Self::Code(decode_payload(id, tag, payload)),
            "quote" => Self::Quote(decode_payload(id, tag, payload)),
            "divider" => Self::Divider,
            "callout" => Self::Callout(decode_payload(id, tag, payload)),
            "image" => Self::Image(decode_payload(id, tag, payload)),
            "table" => Self::Table(decode_payload(id, tag, payload)),
            "table_row" => Self::TableRow(decode_payload(id, tag, payload)),
            "bulleted_list_item" => Self::BulletedListItem(decode_payload(id, tag, payload)),
            "numbered_list_item" => Self::NumberedListItem(decode_payload(id, tag, payload)),
            "toggle" => Self::Toggle(decode_payload(id, tag, payload)),
            "child_page" => Self::ChildPage(decode_payload(id, tag, payload)),
            "column_list" => Self::ColumnList,
            "column" => Self::Column,
            "table_of_contents" => Self::TableOfContents,
            _ => Self::Unsupported {
                block_type: tag.to_owned(),
                payload: payload.unwrap_or_else(|| Value::Object(Map::new())),
            },
        }
    }

    fn payload(&self) -> Value {
        let encoded = match self {
            Self::Paragraph(p)
            | Self::Heading1(p)
            | Self::Heading2(p)
            | Self::Heading3(p)
            | Self::Quote(p)
            | Self::BulletedListItem(p)
            | Self::NumberedListItem(p)
            | Self::Toggle(p) => serde_json::to_value(p),
            Self::ToDo(p) => serde_json::to_value(p),
            Self::Code(p) => serde_json::to_value(p),
            Self::Callout(p) => serde_json::to_value(p),
            Self::Image(p) => serde_json::to_value(p),
            Self::Table(p) => serde_json::to_value(p),
            Self::TableRow(p) => serde_json::to_value(p),
            Self::ChildPage(p) => serde_json::to_value(p),
            Self::Divider | Self::ColumnList | Self::Column | Self::TableOfContents => {
                Ok(Value::Object(Map::new()))
            }
            Self::Unsupported { payload, .. } => Ok(payload.clone()),
        };
        // Payload structs are plain data and always encode.
        encoded.unwrap_or(Value::Null)
    }
}

fn decode_payload<T: DeserializeOwned + Default>(id: &str, tag: &str, payload: Option<Value>) -> T {
    let Some(value) = payload else {
        return T::default();
    };
    serde_json::from_value(value).unwrap_or_else(|e| {
        warn!("Malformed {} payload in block {}: {}", tag, id, e);
        T::default()
    })
}

/// Payload made of rich text only (paragraph, headings, quote, list items, toggle).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TextPayload {
    /// Block text. Older API versions call this field `text`.
    #[serde(alias = "text")]
    pub rich_text: RichText,
}

impl TextPayload {
    /// Payload with a single unlinked span.
    #[must_use]
    pub fn plain(text: &str) -> Self {
        Self {
            rich_text: RichText::from(text),
        }
    }
}

/// To-do payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ToDo {
    pub rich_text: RichText,
    pub checked: bool,
}

/// Code payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Code {
    pub rich_text: RichText,
    /// Language tag, e.g. `rust` or `plain text`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Callout payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Callout {
    pub rich_text: RichText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
}

/// Page or callout icon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Icon {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<FileRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<FileRef>,
}

/// URL holder used by the `file` and `external` file variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FileRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A file object: hosted by Notion (`file`) or linked (`external`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FileObject {
    /// Declared variant, `file` or `external`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<FileRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<FileRef>,
}

impl FileObject {
    /// Resolve the asset URL.
    ///
    /// The declared variant is tried first, then the other one. Empty URLs
    /// count as missing.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        let file = self.file.as_ref().and_then(|f| f.url.as_deref());
        let external = self.external.as_ref().and_then(|f| f.url.as_deref());
        let ordered = if self.source_type.as_deref() == Some("external") {
            [external, file]
        } else {
            [file, external]
        };
        ordered.into_iter().flatten().find(|url| !url.is_empty())
    }
}

/// Image payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Image {
    #[serde(flatten)]
    pub source: FileObject,
    pub caption: RichText,
}

/// Table payload. Rows are the block's children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Table {
    pub table_width: u32,
    pub has_column_header: bool,
    pub has_row_header: bool,
}

/// Table row payload: one rich text per cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TableRow {
    pub cells: Vec<RichText>,
}

/// Child page payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChildPage {
    pub title: String,
}

/// Wire shape of a block.
#[derive(Deserialize, Serialize)]
struct RawBlock {
    #[serde(default)]
    id: String,
    #[serde(rename = "type", default)]
    block_type: String,
    #[serde(default)]
    has_children: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Block>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl From<RawBlock> for Block {
    fn from(mut raw: RawBlock) -> Self {
        let payload = raw.rest.remove(&raw.block_type);
        let kind = BlockKind::decode(&raw.id, &raw.block_type, payload);
        Self {
            id: raw.id,
            has_children: raw.has_children,
            kind,
            children: raw.children,
        }
    }
}

impl From<Block> for RawBlock {
    fn from(block: Block) -> Self {
        let block_type = block.kind.type_tag().to_owned();
        let mut rest = Map::new();
        rest.insert("object".to_owned(), Value::String("block".to_owned()));
        rest.insert(block_type.clone(), block.kind.payload());
        Self {
            id: block.id,
            block_type,
            has_children: block.has_children,
            children: block.children,
            rest,
        }
    }
}
