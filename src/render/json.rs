//! JSON rendering for reconstructed layouts.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Extraction, LayoutDocument};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &LayoutDocument, format: JsonFormat) -> Result<String> {
    serialize(doc, format)
}

/// Convert an extraction (document or no-text outcome) to JSON.
pub fn extraction_to_json(extraction: &Extraction, format: JsonFormat) -> Result<String> {
    serialize(extraction, format)
}

fn serialize<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
