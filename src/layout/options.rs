//! Layout analysis options and configuration.

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Words that mark a row as tabular.
///
/// `cell_terms` are compared against a whole cell (lower-cased);
/// `continuation_terms` are searched as substrings of a whole row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableVocabulary {
    /// Whole-cell matches counted by the table-row test
    pub cell_terms: Vec<String>,

    /// Substring matches that keep an open table going
    pub continuation_terms: Vec<String>,
}

impl TableVocabulary {
    /// Create a vocabulary from explicit term lists.
    pub fn new<C, T, S>(cell_terms: C, continuation_terms: T) -> Self
    where
        C: IntoIterator<Item = S>,
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cell_terms: cell_terms
                .into_iter()
                .map(|t| t.into().to_lowercase())
                .collect(),
            continuation_terms: continuation_terms
                .into_iter()
                .map(|t| t.into().to_lowercase())
                .collect(),
        }
    }

    /// Parse a vocabulary from JSON.
    ///
    /// Missing keys fall back to the default term lists.
    pub fn from_json(json: &str) -> Result<Self> {
        let vocabulary: Self = serde_json::from_str(json)
            .map_err(|e| Error::InvalidConfig(format!("vocabulary: {}", e)))?;
        Ok(Self::new(
            vocabulary.cell_terms,
            vocabulary.continuation_terms,
        ))
    }

    /// Load a vocabulary from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check whether a lower-cased cell is a table term.
    pub fn is_cell_term(&self, lowered: &str) -> bool {
        self.cell_terms.iter().any(|t| t == lowered)
    }

    /// Compile the continuation matcher: any digit or any continuation term.
    pub fn continuation_regex(&self) -> Result<Regex> {
        let mut pattern = String::from(r"\d");
        for term in self.continuation_terms.iter().filter(|t| !t.is_empty()) {
            pattern.push('|');
            pattern.push_str(&regex::escape(term));
        }
        Regex::new(&pattern).map_err(|e| Error::InvalidConfig(e.to_string()))
    }
}

impl Default for TableVocabulary {
    fn default() -> Self {
        let mut cell_terms = vec!["month"];
        cell_terms.extend(MONTHS);
        cell_terms.extend(["sales", "rs", "budget"]);

        let mut continuation_terms = vec!["rs", "month"];
        continuation_terms.extend(MONTHS);

        Self::new(cell_terms, continuation_terms)
    }
}

/// Options for reconstructing layout from OCR tokens.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Tokens at or below this confidence are dropped
    pub confidence_threshold: f64,

    /// Maximum distance between a token's center and a row's running mean
    pub row_threshold: f64,

    /// Share of table-like cells needed for a table row (0.0-1.0)
    pub table_ratio: f64,

    /// How many rows back the continuation test looks for table context
    pub continuation_lookback: usize,

    /// Rows shorter than this (in chars) start a new paragraph
    pub short_line_len: usize,

    /// Table vocabulary
    pub vocabulary: TableVocabulary,

    /// Apply Unicode NFC normalization to recognized text
    pub normalize_unicode: bool,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the confidence threshold.
    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Set the row grouping threshold.
    pub fn with_row_threshold(mut self, threshold: f64) -> Self {
        self.row_threshold = threshold;
        self
    }

    /// Set the table-row ratio.
    pub fn with_table_ratio(mut self, ratio: f64) -> Self {
        self.table_ratio = ratio;
        self
    }

    /// Set the continuation look-back window.
    pub fn with_continuation_lookback(mut self, rows: usize) -> Self {
        self.continuation_lookback = rows;
        self
    }

    /// Set the short-line length for paragraph breaks.
    pub fn with_short_line_len(mut self, len: usize) -> Self {
        self.short_line_len = len;
        self
    }

    /// Set the table vocabulary.
    pub fn with_vocabulary(mut self, vocabulary: TableVocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Enable or disable Unicode NFC normalization.
    pub fn with_unicode_normalization(mut self, enable: bool) -> Self {
        self.normalize_unicode = enable;
        self
    }

    /// Check that every numeric option is in range.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(Error::InvalidConfig(format!(
                "confidence threshold must be within 0.0-1.0, got {}",
                self.confidence_threshold
            )));
        }
        if !self.row_threshold.is_finite() || self.row_threshold < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "row threshold must be a non-negative number, got {}",
                self.row_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.table_ratio) {
            return Err(Error::InvalidConfig(format!(
                "table ratio must be within 0.0-1.0, got {}",
                self.table_ratio
            )));
        }
        Ok(())
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.6,
            row_threshold: 25.0,
            table_ratio: 0.4,
            continuation_lookback: 3,
            short_line_len: 50,
            vocabulary: TableVocabulary::default(),
            normalize_unicode: false,
        }
    }
}
