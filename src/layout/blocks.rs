//! Block construction: table grids and paragraphs per region.

use crate::model::{Block, Paragraph, Region, RegionKind, Row, TableGrid};

/// Row prefixes that mark an enumerated item.
const ENUM_MARKERS: [&str; 4] = ["a.", "b.", "c.", "d."];

/// Group text rows into paragraphs.
///
/// A row starts a new paragraph when it ends with `:`, starts with an
/// enumerated marker (`a.` to `d.`), or is shorter than `short_line_len`
/// chars while a paragraph is open. The row right after a `:` lead-in stays
/// with the lead-in unless it is itself enumerated or a lead-in.
pub fn group_paragraphs<I, S>(lines: I, short_line_len: usize) -> Vec<Paragraph>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut paragraphs = Vec::new();
    let mut current = Paragraph::new();
    let mut after_lead_in = false;

    for line in lines {
        let line: String = line.into();
        let trimmed = line.trim();

        let lead_in = trimmed.ends_with(':');
        let enumerated = ENUM_MARKERS.iter().any(|m| trimmed.starts_with(m));
        let short = current.line_count() > 0 && line.chars().count() < short_line_len;

        if (lead_in || enumerated || (short && !after_lead_in)) && current.line_count() > 0 {
            paragraphs.push(std::mem::take(&mut current));
        }

        after_lead_in = lead_in;
        current.push(line);
    }

    if current.line_count() > 0 {
        paragraphs.push(current);
    }

    paragraphs
}

/// Build one block per region.
pub fn build_blocks(rows: &[Row], regions: &[Region], short_line_len: usize) -> Vec<Block> {
    regions
        .iter()
        .map(|region| {
            let region_rows = region.rows.iter().filter_map(|&i| rows.get(i));
            match region.kind {
                RegionKind::Table => Block::Table {
                    rows: region.rows.clone(),
                    grid: TableGrid::from_rows(region_rows),
                },
                RegionKind::Text => Block::Text {
                    rows: region.rows.clone(),
                    paragraphs: group_paragraphs(region_rows.map(Row::text), short_line_len),
                },
            }
        })
        .collect()
}
