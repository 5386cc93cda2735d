//! Notion API data types.

mod block;
mod list;
mod page;
mod rich_text;

pub use block::{
    Block, BlockKind, Callout, ChildPage, Code, FileObject, FileRef, Icon, Image, Table, TableRow,
    TextPayload, ToDo,
};
pub use list::{ApiErrorBody, ChildrenPage};
pub use page::Page;
pub use rich_text::{RichText, RichTextSpan};
