//! Paragraph types.

use serde::{Deserialize, Serialize};

/// A paragraph assembled from consecutive text rows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Row strings in reading order
    pub lines: Vec<String>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph holding a single line.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            lines: vec![text.into()],
        }
    }

    /// Append a row string.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Number of row strings.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if the paragraph holds no text.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }

    /// Row strings joined by single spaces.
    pub fn text(&self) -> String {
        self.lines.join(" ")
    }
}
