//! Plain text rendering.

use crate::error::Result;
use crate::model::LayoutDocument;

/// Convert a document to plain text.
///
/// Table rows are tab-separated; paragraphs sit on their own lines; blocks
/// are separated by a blank line.
pub fn to_text(doc: &LayoutDocument) -> Result<String> {
    Ok(doc.plain_text().trim().to_string())
}
