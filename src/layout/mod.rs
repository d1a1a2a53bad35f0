//! Layout reconstruction from OCR tokens.
//!
//! The stages run strictly forward:
//! normalize → group rows → classify → merge regions → build blocks.
//!
//! # Example
//!
//! ```
//! use unscan::layout::{LayoutAnalyzer, LayoutOptions};
//! use unscan::ocr::OcrOutput;
//!
//! let mut output = OcrOutput::new();
//! output.push("Month", [0.0, 0.0, 50.0, 20.0], 0.9);
//! output.push("Sales", [60.0, 0.0, 110.0, 20.0], 0.9);
//!
//! let analyzer = LayoutAnalyzer::new(LayoutOptions::default()).unwrap();
//! let extraction = analyzer.analyze(&output);
//! assert_eq!(extraction.document().unwrap().tables().count(), 1);
//! ```

mod blocks;
mod classify;
mod merge;
mod normalize;
mod options;
mod rows;

pub use blocks::{build_blocks, group_paragraphs};
pub use classify::{RegionClassifier, RegionScan, ScanState};
pub use merge::merge_regions;
pub use normalize::{clean_text, normalize_tokens};
pub use options::{LayoutOptions, TableVocabulary};
pub use rows::group_into_rows;

use crate::error::Result;
use crate::model::{Extraction, LayoutDocument, Metadata, NoTextReason, Token};
use crate::ocr::OcrOutput;

/// Runs the full layout pipeline with one set of options.
#[derive(Debug, Clone)]
pub struct LayoutAnalyzer {
    options: LayoutOptions,
    classifier: RegionClassifier,
}

impl LayoutAnalyzer {
    /// Validate the options and prepare the classifier.
    pub fn new(options: LayoutOptions) -> Result<Self> {
        options.validate()?;
        let classifier = RegionClassifier::new(&options)?;
        Ok(Self {
            options,
            classifier,
        })
    }

    /// The options in use.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Reconstruct the layout of raw OCR output.
    pub fn analyze(&self, output: &OcrOutput) -> Extraction {
        if output.is_empty() {
            log::debug!("analyze: empty OCR output");
            return Extraction::NoText(NoTextReason::EmptyOcrOutput);
        }

        let (tokens, stats) = normalize_tokens(output, &self.options);
        if tokens.is_empty() {
            return Extraction::NoText(NoTextReason::AllTokensFiltered);
        }

        let mut extraction = self.analyze_tokens(tokens);
        if let Extraction::Document(doc) = &mut extraction {
            doc.metadata.tokens = stats;
        }
        extraction
    }

    /// Reconstruct the layout of already-normalized tokens.
    pub fn analyze_tokens(&self, tokens: Vec<Token>) -> Extraction {
        let rows = group_into_rows(tokens, self.options.row_threshold);
        if rows.is_empty() {
            return Extraction::NoText(NoTextReason::NoRows);
        }

        let scan = self.classifier.scan(&rows);
        let regions = merge_regions(&scan);
        let blocks = build_blocks(&rows, &regions, self.options.short_line_len);

        Extraction::Document(LayoutDocument {
            metadata: Metadata::default(),
            rows,
            regions,
            blocks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, RegionKind};

    fn analyzer() -> LayoutAnalyzer {
        LayoutAnalyzer::new(LayoutOptions::default()).unwrap()
    }

    #[test]
    fn test_rejects_invalid_options() {
        assert!(LayoutAnalyzer::new(LayoutOptions::new().with_confidence_threshold(2.0)).is_err());
    }

    #[test]
    fn test_empty_output() {
        let extraction = analyzer().analyze(&OcrOutput::new());
        assert_eq!(
            extraction.no_text_reason(),
            Some(&NoTextReason::EmptyOcrOutput)
        );
    }

    #[test]
    fn test_all_filtered() {
        let mut output = OcrOutput::new();
        output.push("faint", [0.0, 0.0, 10.0, 10.0], 0.5);
        output.push("   ", [0.0, 20.0, 10.0, 30.0], 0.9);

        let extraction = analyzer().analyze(&output);
        assert_eq!(
            extraction.no_text_reason(),
            Some(&NoTextReason::AllTokensFiltered)
        );
    }

    #[test]
    fn test_table_then_text() {
        let mut output = OcrOutput::new();
        output.push("Month", [0.0, 0.0, 50.0, 20.0], 0.9);
        output.push("Sales", [60.0, 0.0, 110.0, 20.0], 0.9);
        output.push("Jan", [0.0, 30.0, 50.0, 50.0], 0.9);
        output.push("100", [60.0, 30.0, 110.0, 50.0], 0.9);
        output.push("Prepared by the finance team.", [0.0, 90.0, 200.0, 110.0], 0.9);
        output.push("ignored", [0.0, 140.0, 40.0, 160.0], 0.3);

        let extraction = analyzer().analyze(&output);
        let doc = extraction.document().unwrap();

        assert_eq!(doc.row_count(), 3);
        assert_eq!(doc.regions.len(), 2);
        assert_eq!(doc.regions[0].kind, RegionKind::Table);
        assert_eq!(doc.metadata.tokens.seen, 6);
        assert_eq!(doc.metadata.tokens.kept, 5);
        assert!(matches!(&doc.blocks[1], Block::Text { paragraphs, .. }
            if paragraphs[0].text() == "Prepared by the finance team."));
    }
}
