//! Rendering result with metadata and statistics.

use crate::model::{Block, LayoutDocument, Metadata};
use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (Markdown, report, etc.)
    pub content: String,

    /// Document metadata (copied from source document)
    pub metadata: Metadata,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, metadata: Metadata, stats: ExtractionStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected during extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of documents counted
    pub document_count: u32,

    /// Number of rows formed
    pub row_count: u32,

    /// Number of table blocks
    pub table_count: u32,

    /// Number of table cells (after padding)
    pub cell_count: u32,

    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count everything in a document.
    pub fn from_document(doc: &LayoutDocument) -> Self {
        let mut stats = Self::new();
        stats.document_count = 1;
        stats.add_rows(doc.row_count());
        for block in &doc.blocks {
            match block {
                Block::Table { grid, .. } => {
                    stats.add_table();
                    stats.cell_count += (grid.row_count() * grid.column_count()) as u32;
                }
                Block::Text { paragraphs, .. } => {
                    for _ in paragraphs {
                        stats.add_paragraph();
                    }
                }
            }
        }
        stats.count_text(&doc.plain_text());
        stats
    }

    /// Add to the row count.
    pub fn add_rows(&mut self, rows: usize) {
        self.row_count += rows as u32;
    }

    /// Increment table count.
    pub fn add_table(&mut self) {
        self.table_count += 1;
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        // Word count: whitespace-separated tokens
        self.word_count += text.split_whitespace().count() as u32;

        // Character count: non-whitespace characters
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.document_count += other.document_count;
        self.row_count += other.row_count;
        self.table_count += other.table_count;
        self.cell_count += other.cell_count;
        self.paragraph_count += other.paragraph_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
