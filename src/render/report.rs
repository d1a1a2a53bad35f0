//! Human-readable layout report.

use crate::error::Result;
use crate::model::{Block, Extraction, LayoutDocument, RegionKind};

use super::{format_table, RenderOptions};

/// The whole report when nothing was detected.
pub const NO_TEXT_DETECTED: &str = "No text detected";

/// Render the report for an extraction.
///
/// A [`Extraction::NoText`] outcome renders as exactly [`NO_TEXT_DETECTED`].
pub fn to_report(extraction: &Extraction, options: &RenderOptions) -> Result<String> {
    match extraction {
        Extraction::Document(doc) => document_report(doc, options),
        Extraction::NoText(reason) => {
            log::debug!("report: no text ({})", reason);
            Ok(NO_TEXT_DETECTED.to_string())
        }
    }
}

/// Render the report for a document.
///
/// The title and `=` banner come first. Each block follows as a blank line,
/// its label, a `-` divider and its content; every paragraph is followed by
/// a blank line. A blank line and the banner close the report. The result
/// has no trailing newline.
pub fn document_report(doc: &LayoutDocument, options: &RenderOptions) -> Result<String> {
    if doc.blocks.is_empty() {
        return Ok(NO_TEXT_DETECTED.to_string());
    }

    let banner = "=".repeat(options.banner_width);
    let divider = "-".repeat(options.divider_width);

    let mut lines: Vec<String> = vec![options.title.clone(), banner.clone()];

    for block in &doc.blocks {
        lines.push(String::new());
        lines.push(label(block.kind(), options.icons));
        lines.push(divider.clone());

        match block {
            Block::Table { grid, .. } => {
                lines.push(format_table(grid, options.min_column_width));
            }
            Block::Text { paragraphs, .. } => {
                for para in paragraphs {
                    lines.push(para.text());
                    lines.push(String::new());
                }
            }
        }
    }

    lines.push(String::new());
    lines.push(banner);

    Ok(lines.join("\n"))
}

fn label(kind: RegionKind, icons: bool) -> String {
    if !icons {
        return format!("{}:", kind.label());
    }
    let icon = match kind {
        RegionKind::Table => "📊",
        RegionKind::Text => "📄",
    };
    format!("{} {}:", icon, kind.label())
}
