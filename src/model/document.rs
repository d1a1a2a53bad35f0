//! Document-level types.

use serde::{Deserialize, Serialize};

use super::{Paragraph, Region, RegionKind, Row, TableGrid};
use crate::detect::ImageFormat;

/// The reconstructed layout of one scanned image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Source and processing metadata
    pub metadata: Metadata,

    /// Rows, top to bottom
    pub rows: Vec<Row>,

    /// Maximal same-kind runs of rows, in document order
    pub regions: Vec<Region>,

    /// Structural content, one block per region
    pub blocks: Vec<Block>,
}

impl LayoutDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the document has any rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over the table blocks.
    pub fn tables(&self) -> impl Iterator<Item = &TableGrid> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table { grid, .. } => Some(grid),
            Block::Text { .. } => None,
        })
    }

    /// Iterate over every paragraph of every text block.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().flat_map(|b| match b {
            Block::Text { paragraphs, .. } => paragraphs.as_slice(),
            Block::Table { .. } => &[],
        })
    }

    /// Get plain text content: tables tab-separated, paragraphs on their own lines.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Structural content of a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Block {
    /// A table region as a padded grid
    Table {
        /// Source row indices
        rows: Vec<usize>,
        /// Padded cells
        grid: TableGrid,
    },
    /// A text region as paragraphs
    Text {
        /// Source row indices
        rows: Vec<usize>,
        /// Paragraphs in reading order
        paragraphs: Vec<Paragraph>,
    },
}

impl Block {
    /// Classification of the block.
    pub fn kind(&self) -> RegionKind {
        match self {
            Block::Table { .. } => RegionKind::Table,
            Block::Text { .. } => RegionKind::Text,
        }
    }

    /// Source row indices.
    pub fn rows(&self) -> &[usize] {
        match self {
            Block::Table { rows, .. } | Block::Text { rows, .. } => rows,
        }
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Table { grid, .. } => grid.plain_text(),
            Block::Text { paragraphs, .. } => paragraphs
                .iter()
                .map(Paragraph::text)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Source and processing metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Source name (usually the image path)
    pub source: Option<String>,

    /// Detected image format
    pub format: Option<ImageFormat>,

    /// Image width in pixels
    pub width: Option<u32>,

    /// Image height in pixels
    pub height: Option<u32>,

    /// Name of the OCR engine that produced the tokens
    pub engine: Option<String>,

    /// Token counters from normalization
    pub tokens: NormalizeStats,
}

/// Token counters collected by the normalizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeStats {
    /// Tokens offered by the OCR engine
    pub seen: usize,
    /// Tokens kept
    pub kept: usize,
    /// Tokens at or below the confidence threshold
    pub low_confidence: usize,
    /// Tokens whose cleaned text was empty
    pub empty_text: usize,
}

impl NormalizeStats {
    /// Total tokens dropped.
    pub fn dropped(&self) -> usize {
        self.low_confidence + self.empty_text
    }
}
