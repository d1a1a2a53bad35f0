//! Row grouping by vertical-center proximity.

use crate::model::{Row, RowItem, Token};

/// Group tokens into rows, top to bottom.
///
/// Tokens are sorted by vertical center (stable) and scanned once. A token
/// joins the open row when its center is within `threshold` of the row's
/// running mean; otherwise the open row is closed and a new one starts.
/// Every token lands in exactly one row, and items within a row are ordered
/// by left edge.
pub fn group_into_rows(tokens: Vec<Token>, threshold: f64) -> Vec<Row> {
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut items: Vec<RowItem> = tokens.into_iter().map(RowItem::from).collect();
    items.sort_by(|a, b| a.y_center.total_cmp(&b.y_center));

    let mut rows = Vec::new();
    let mut current: Vec<RowItem> = Vec::new();
    let mut y_sum = 0.0f64;

    for item in items {
        if !current.is_empty() {
            let mean = y_sum / current.len() as f64;
            if (item.y_center - mean).abs() > threshold {
                rows.push(Row::from_items(std::mem::take(&mut current)));
                y_sum = 0.0;
            }
        }
        y_sum += item.y_center;
        current.push(item);
    }

    if !current.is_empty() {
        rows.push(Row::from_items(current));
    }

    log::debug!("group_into_rows: {} rows", rows.len());
    rows
}
