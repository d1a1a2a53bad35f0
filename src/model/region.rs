//! Region types.

use serde::{Deserialize, Serialize};

/// Classification of a row or region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    /// Tabular data
    Table,
    /// Prose
    Text,
}

impl RegionKind {
    /// Upper-case label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            RegionKind::Table => "TABLE",
            RegionKind::Text => "TEXT",
        }
    }
}

impl std::fmt::Display for RegionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A maximal run of consecutive rows sharing a classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Classification of every row in the region
    pub kind: RegionKind,
    /// Row indices, ascending and contiguous
    pub rows: Vec<usize>,
}

impl Region {
    /// Create a region.
    pub fn new(kind: RegionKind, rows: Vec<usize>) -> Self {
        Self { kind, rows }
    }

    /// Number of rows in the region.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the region has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check if this is a table region.
    pub fn is_table(&self) -> bool {
        self.kind == RegionKind::Table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_kind_label() {
        assert_eq!(RegionKind::Table.label(), "TABLE");
        assert_eq!(RegionKind::Text.to_string(), "TEXT");
    }

    #[test]
    fn test_region() {
        let region = Region::new(RegionKind::Table, vec![2, 3, 4]);
        assert!(region.is_table());
        assert_eq!(region.len(), 3);
        assert!(!region.is_empty());
    }
}
