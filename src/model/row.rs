//! Row types produced by the row grouper.

use serde::{Deserialize, Serialize};

use super::{BoundingBox, Token};

/// A token placed on a row, with its derived geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowItem {
    /// Cleaned text
    pub text: String,
    /// Mean y of the polygon
    pub y_center: f64,
    /// Leftmost x of the polygon
    pub x_left: f64,
    /// Rightmost x of the polygon
    pub x_right: f64,
    /// Original polygon
    pub bbox: BoundingBox,
}

impl From<Token> for RowItem {
    fn from(token: Token) -> Self {
        Self {
            y_center: token.bbox.y_center(),
            x_left: token.bbox.x_left(),
            x_right: token.bbox.x_right(),
            bbox: token.bbox,
            text: token.text,
        }
    }
}

/// A horizontal line of items, sorted left to right.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    /// Items in reading order
    pub items: Vec<RowItem>,
}

impl Row {
    /// Create a row from items that are already in reading order.
    pub fn new(items: Vec<RowItem>) -> Self {
        Self { items }
    }

    /// Build a row from unordered items, sorting them by left edge.
    ///
    /// The sort is stable, so items sharing a left edge keep their order.
    pub fn from_items(mut items: Vec<RowItem>) -> Self {
        items.sort_by(|a, b| a.x_left.total_cmp(&b.x_left));
        Self { items }
    }

    /// Number of items (cells) on the row.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the row has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item texts in reading order.
    pub fn cells(&self) -> Vec<String> {
        self.items.iter().map(|i| i.text.clone()).collect()
    }

    /// Item texts joined by single spaces.
    pub fn text(&self) -> String {
        self.items
            .iter()
            .map(|i| i.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Mean vertical center of the row's items.
    pub fn y_center(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        self.items.iter().map(|i| i.y_center).sum::<f64>() / self.items.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(text: &str, x: f64, y: f64) -> RowItem {
        RowItem::from(Token::new(
            text,
            BoundingBox::from_rect(x, y - 5.0, x + 40.0, y + 5.0),
            0.9,
        ))
    }

    #[test]
    fn test_row_item_from_token() {
        let it = item("Jan", 10.0, 40.0);
        assert_eq!(it.x_left, 10.0);
        assert_eq!(it.x_right, 50.0);
        assert!((it.y_center - 40.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_items_sorts_left_to_right() {
        let row = Row::from_items(vec![item("b", 60.0, 10.0), item("a", 0.0, 10.0)]);
        assert_eq!(row.cells(), vec!["a", "b"]);
        assert_eq!(row.text(), "a b");
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_empty_row() {
        let row = Row::default();
        assert!(row.is_empty());
        assert_eq!(row.text(), "");
        assert_eq!(row.y_center(), 0.0);
    }
}
