//! Outcome of processing one scan.

use serde::{Deserialize, Serialize};

use super::LayoutDocument;

/// Result of one document run that did not fail.
///
/// An image with nothing readable on it is a normal outcome, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", content = "content", rename_all = "snake_case")]
pub enum Extraction {
    /// Text was found and structured
    Document(LayoutDocument),
    /// Nothing to structure
    NoText(NoTextReason),
}

impl Extraction {
    /// Borrow the document, if any.
    pub fn document(&self) -> Option<&LayoutDocument> {
        match self {
            Extraction::Document(doc) => Some(doc),
            Extraction::NoText(_) => None,
        }
    }

    /// Take the document, if any.
    pub fn into_document(self) -> Option<LayoutDocument> {
        match self {
            Extraction::Document(doc) => Some(doc),
            Extraction::NoText(_) => None,
        }
    }

    /// Why no text was found, if that is the outcome.
    pub fn no_text_reason(&self) -> Option<&NoTextReason> {
        match self {
            Extraction::Document(_) => None,
            Extraction::NoText(reason) => Some(reason),
        }
    }

    /// Check if nothing was detected.
    pub fn is_no_text(&self) -> bool {
        matches!(self, Extraction::NoText(_))
    }
}

/// Why a run ended without text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoTextReason {
    /// The engine returned nothing
    EmptyOcrOutput,
    /// The engine returned a shape that could not be read
    MalformedOcrOutput(String),
    /// Every token was low-confidence or blank
    AllTokensFiltered,
    /// Row grouping produced nothing
    NoRows,
}

impl std::fmt::Display for NoTextReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoTextReason::EmptyOcrOutput => f.write_str("OCR engine returned no text"),
            NoTextReason::MalformedOcrOutput(detail) => {
                write!(f, "OCR output could not be read: {}", detail)
            }
            NoTextReason::AllTokensFiltered => {
                f.write_str("all tokens were below the confidence threshold or blank")
            }
            NoTextReason::NoRows => f.write_str("no rows were formed"),
        }
    }
}
