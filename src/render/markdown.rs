//! Markdown rendering for reconstructed layouts.

use crate::error::Result;
use crate::model::{Block, LayoutDocument, Paragraph, TableGrid};

use super::{ExtractionStats, RenderOptions, RenderResult};

/// Convert a document to Markdown.
pub fn to_markdown(doc: &LayoutDocument, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &LayoutDocument, options: &RenderOptions) -> Result<RenderResult> {
    let mut options = options.clone();
    options.collect_stats = true;
    let renderer = MarkdownRenderer::new(options);
    renderer.render_with_stats(doc)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
    stats: ExtractionStats,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: ExtractionStats::new(),
        }
    }

    /// Render a document to Markdown.
    pub fn render(mut self, doc: &LayoutDocument) -> Result<String> {
        self.render_internal(doc)
    }

    /// Render a document to Markdown with extraction statistics.
    pub fn render_with_stats(mut self, doc: &LayoutDocument) -> Result<RenderResult> {
        self.options.collect_stats = true;
        let content = self.render_internal(doc)?;

        self.stats.add_rows(doc.row_count());
        self.stats.count_text(&content);

        Ok(RenderResult::new(content, doc.metadata.clone(), self.stats))
    }

    fn render_internal(&mut self, doc: &LayoutDocument) -> Result<String> {
        let mut output = String::new();
        for block in &doc.blocks {
            self.render_block(&mut output, block);
        }
        Ok(output.trim().to_string())
    }

    fn render_block(&mut self, output: &mut String, block: &Block) {
        match block {
            Block::Table { grid, .. } => {
                if self.options.collect_stats {
                    self.stats.add_table();
                }
                self.render_table(output, grid);
            }
            Block::Text { paragraphs, .. } => {
                for para in paragraphs {
                    self.render_paragraph(output, para);
                }
            }
        }
    }

    fn render_paragraph(&mut self, output: &mut String, para: &Paragraph) {
        if para.is_empty() {
            return;
        }
        if self.options.collect_stats {
            self.stats.add_paragraph();
        }
        output.push_str(&self.escape(&para.text()));
        output.push_str("\n\n");
    }

    fn render_table(&self, output: &mut String, grid: &TableGrid) {
        if grid.column_count() == 0 {
            return;
        }

        for (i, row) in grid.rows.iter().enumerate() {
            output.push('|');
            for cell in row {
                output.push_str(&format!(" {} |", self.escape_cell(cell)));
            }
            output.push('\n');

            // Row 0 is always the header in a pipe table
            if i == 0 {
                output.push('|');
                for _ in row {
                    output.push_str(" --- |");
                }
                output.push('\n');
            }
        }

        output.push('\n');
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }

    // Pipes always break a table row, so they are escaped even with escaping off.
    fn escape_cell(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.replace('|', "\\|")
        }
    }
}

/// Escape special Markdown characters.
/// Only characters that could be misread as inline syntax are escaped.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
