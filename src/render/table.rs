//! Fixed-width ASCII table grid.

use crate::model::TableGrid;

/// Format a grid as `| cell | cell |` lines.
///
/// Cells are left-justified to their column width with one space of margin
/// on each side. A `|----|----|` separator follows the first row when the
/// grid has more than one row. The result has no trailing newline.
pub fn format_table(grid: &TableGrid, min_column_width: usize) -> String {
    if grid.is_empty() {
        return String::new();
    }

    let widths = grid.column_widths(min_column_width);
    let separator = format!(
        "|{}|",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("|")
    );

    let mut lines = Vec::with_capacity(grid.row_count() + 1);
    for (i, row) in grid.rows.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!(" {:<width$} ", cell, width = width))
            .collect();
        lines.push(format!("|{}|", cells.join("|")));

        if i == 0 && grid.has_header() {
            lines.push(separator.clone());
        }
    }

    lines.join("\n")
}
