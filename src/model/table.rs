//! Table types.

use serde::{Deserialize, Serialize};

use super::Row;

/// Row-major grid of a table region.
///
/// Every row holds exactly [`TableGrid::column_count`] cells; shorter source
/// rows are right-padded with empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableGrid {
    /// Cells, one vector per row
    pub rows: Vec<Vec<String>>,
}

impl TableGrid {
    /// Create a new empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a padded grid from raw cell lists.
    pub fn from_cells<I, R, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|r| r.into_iter().map(Into::into).collect())
            .collect();

        let max_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(max_cols, String::new());
        }

        Self { rows }
    }

    /// Build a padded grid from layout rows, one cell per row item.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a Row>) -> Self {
        Self::from_cells(rows.into_iter().map(Row::cells))
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    /// Check if the grid is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether row 0 acts as a header (more than one row).
    pub fn has_header(&self) -> bool {
        self.rows.len() > 1
    }

    /// Display width of each column in chars, never below `min_width`.
    pub fn column_widths(&self, min_width: usize) -> Vec<usize> {
        let mut widths = vec![0usize; self.column_count()];
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths.into_iter().map(|w| w.max(min_width)).collect()
    }

    /// Get plain text representation of the table (tab-separated).
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
