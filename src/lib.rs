//! # unscan
//!
//! Layout reconstruction for OCR output.
//!
//! OCR engines return an unordered bag of text fragments with bounding boxes.
//! This library turns that bag into reading-order rows, tells tabular rows
//! from prose, and renders the result as a report, Markdown or JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unscan::{render, Pipeline, PipelineOptions, TesseractEngine};
//!
//! fn main() -> unscan::Result<()> {
//!     let pipeline = Pipeline::new(TesseractEngine::new(), PipelineOptions::default())?;
//!     let extraction = pipeline.process_path("scan.png")?;
//!
//!     let report = render::to_report(&extraction, &render::RenderOptions::default())?;
//!     println!("{}", report);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Row grouping**: tokens clustered by vertical center, ordered left to right
//! - **Table detection**: digit and vocabulary heuristics with continuation rows
//! - **Paragraphs**: lead-in, enumeration and short-line breaks
//! - **Pluggable OCR**: Tesseract CLI, PaddleOCR result files, or your own engine
//! - **Parallel batches**: Uses Rayon for multi-image runs

pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod ocr;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_image, ImageFormat};
pub use error::{Error, Result};
pub use layout::{LayoutAnalyzer, LayoutOptions, TableVocabulary};
pub use model::{
    Block, BoundingBox, Extraction, LayoutDocument, Metadata, NoTextReason, Paragraph, Point,
    Region, RegionKind, Row, RowItem, TableGrid, Token,
};
pub use ocr::{OcrEngine, OcrOutput, PaddleJsonEngine, ScanImage, TesseractEngine};
pub use pipeline::{BatchOutcome, Pipeline, PipelineOptions};
pub use render::{JsonFormat, RenderOptions};

use std::path::Path;

/// Reconstruct the layout of raw OCR output with default options.
///
/// # Example
///
/// ```
/// use unscan::{analyze_output, OcrOutput};
///
/// let mut output = OcrOutput::new();
/// output.push("Hello", [0.0, 0.0, 40.0, 12.0], 0.95);
///
/// let extraction = analyze_output(&output).unwrap();
/// assert_eq!(extraction.document().unwrap().row_count(), 1);
/// ```
pub fn analyze_output(output: &OcrOutput) -> Result<Extraction> {
    analyze_output_with_options(output, LayoutOptions::default())
}

/// Reconstruct the layout of raw OCR output with custom options.
pub fn analyze_output_with_options(output: &OcrOutput, options: LayoutOptions) -> Result<Extraction> {
    let analyzer = LayoutAnalyzer::new(options)?;
    Ok(analyzer.analyze(output))
}

/// Process one image file with the given engine and default options.
///
/// # Example
///
/// ```no_run
/// use unscan::{process_file, PaddleJsonEngine};
///
/// // Reads scan_res.json written by PaddleOCR next to the image
/// let extraction = process_file(PaddleJsonEngine::new(), "scan.png").unwrap();
/// println!("no text: {}", extraction.is_no_text());
/// ```
pub fn process_file<E: OcrEngine, P: AsRef<Path>>(engine: E, path: P) -> Result<Extraction> {
    Pipeline::new(engine, PipelineOptions::default())?.process_path(path)
}

/// Render the default report for an image file.
///
/// # Example
///
/// ```no_run
/// use unscan::{report_file, TesseractEngine};
///
/// let report = report_file(TesseractEngine::new(), "scan.png").unwrap();
/// println!("{}", report);
/// ```
pub fn report_file<E: OcrEngine, P: AsRef<Path>>(engine: E, path: P) -> Result<String> {
    let extraction = process_file(engine, path)?;
    render::to_report(&extraction, &RenderOptions::default())
}

/// Convert an image file to Markdown.
///
/// Returns an empty string when no text was detected.
pub fn to_markdown<E: OcrEngine, P: AsRef<Path>>(engine: E, path: P) -> Result<String> {
    match process_file(engine, path)?.into_document() {
        Some(doc) => render::to_markdown(&doc, &RenderOptions::default()),
        None => Ok(String::new()),
    }
}

/// Convert an image file to JSON.
pub fn to_json<E: OcrEngine, P: AsRef<Path>>(engine: E, path: P, format: JsonFormat) -> Result<String> {
    let extraction = process_file(engine, path)?;
    render::extraction_to_json(&extraction, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_output_scenario_table() {
        let mut output = OcrOutput::new();
        output.push("Month", [0.0, 0.0, 50.0, 20.0], 0.9);
        output.push("Sales", [60.0, 0.0, 110.0, 20.0], 0.9);
        output.push("Jan", [0.0, 30.0, 50.0, 50.0], 0.9);
        output.push("100", [60.0, 30.0, 110.0, 50.0], 0.9);

        let extraction = analyze_output(&output).unwrap();
        let doc = extraction.document().unwrap();
        let grid = doc.tables().next().unwrap();
        assert_eq!(grid.rows, vec![vec!["Month", "Sales"], vec!["Jan", "100"]]);
    }

    #[test]
    fn test_analyze_output_invalid_options() {
        let options = LayoutOptions::new().with_table_ratio(3.0);
        assert!(matches!(
            analyze_output_with_options(&OcrOutput::new(), options),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_process_file_missing() {
        let result = process_file(PaddleJsonEngine::new(), "/nonexistent/scan.png");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
