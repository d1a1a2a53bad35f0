//! Row classification: table rows vs. text rows.
//!
//! Classification is a two-state scan over the rows. A table opens on a row
//! that passes the table-row test and stays open while rows pass either the
//! table-row test or the looser continuation test.

use regex::Regex;

use super::{LayoutOptions, TableVocabulary};
use crate::error::{Error, Result};
use crate::model::Row;

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Outside any table
    InText,
    /// Inside a table that opened at row `start`
    InTable {
        /// First row of the open table
        start: usize,
    },
}

/// Output of a classification scan.
///
/// `tables` holds half-open row spans `(start, end)`; `text_rows` holds the
/// remaining row indices. Together they cover every row exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionScan {
    /// Table spans, in order
    pub tables: Vec<(usize, usize)>,
    /// Text row indices, ascending
    pub text_rows: Vec<usize>,
}

/// Labels rows as table or text.
#[derive(Debug, Clone)]
pub struct RegionClassifier {
    vocabulary: TableVocabulary,
    digit: Regex,
    continuation: Regex,
    table_ratio: f64,
    lookback: usize,
}

impl RegionClassifier {
    /// Build a classifier, compiling the continuation matcher once.
    pub fn new(options: &LayoutOptions) -> Result<Self> {
        Ok(Self {
            digit: Regex::new(r"\d").map_err(|e| Error::InvalidConfig(e.to_string()))?,
            continuation: options.vocabulary.continuation_regex()?,
            vocabulary: options.vocabulary.clone(),
            table_ratio: options.table_ratio,
            lookback: options.continuation_lookback,
        })
    }

    /// A row is table-like when it has at least two items and enough of them
    /// hold a decimal digit or are a vocabulary term.
    ///
    /// Other numeric characters (`²`, `½`, `Ⅳ`) are not digits.
    pub fn is_table_row(&self, row: &Row) -> bool {
        if row.len() < 2 {
            return false;
        }

        let hits = row
            .items
            .iter()
            .filter(|item| {
                self.digit.is_match(&item.text)
                    || self.vocabulary.is_cell_term(&item.text.to_lowercase())
            })
            .count();

        hits as f64 >= row.len() as f64 * self.table_ratio
    }

    /// A row continues an open table when one of the previous rows in the
    /// look-back window has two or more items and the row's text contains a
    /// digit or a continuation term.
    pub fn is_continuation_row(&self, rows: &[Row], index: usize) -> bool {
        if index == 0 || index >= rows.len() {
            return false;
        }

        let window = &rows[index.saturating_sub(self.lookback)..index];
        if !window.iter().any(|r| r.len() >= 2) {
            return false;
        }

        self.continuation
            .is_match(&rows[index].text().to_lowercase())
    }

    /// Run the two-state scan over all rows.
    pub fn scan(&self, rows: &[Row]) -> RegionScan {
        let mut scan = RegionScan::default();
        let mut state = ScanState::InText;

        for (i, row) in rows.iter().enumerate() {
            state = match state {
                ScanState::InText if self.is_table_row(row) => ScanState::InTable { start: i },
                ScanState::InText => {
                    scan.text_rows.push(i);
                    ScanState::InText
                }
                ScanState::InTable { start }
                    if self.is_table_row(row) || self.is_continuation_row(rows, i) =>
                {
                    ScanState::InTable { start }
                }
                ScanState::InTable { start } => {
                    scan.tables.push((start, i));
                    scan.text_rows.push(i);
                    ScanState::InText
                }
            };
        }

        if let ScanState::InTable { start } = state {
            scan.tables.push((start, rows.len()));
        }

        log::debug!(
            "classify: {} table spans, {} text rows",
            scan.tables.len(),
            scan.text_rows.len()
        );
        scan
    }
}
