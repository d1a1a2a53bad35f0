//! Document-processing entry point.
//!
//! A [`Pipeline`] owns one OCR engine and one [`LayoutAnalyzer`]. Both are
//! created once and reused for every image it processes.
//!
//! # Example
//!
//! ```no_run
//! use unscan::{Pipeline, PipelineOptions, TesseractEngine};
//!
//! fn main() -> unscan::Result<()> {
//!     let pipeline = Pipeline::new(TesseractEngine::new(), PipelineOptions::default())?;
//!     let extraction = pipeline.process_path("scan.png")?;
//!     if let Some(doc) = extraction.document() {
//!         println!("{} rows", doc.row_count());
//!     }
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::layout::{LayoutAnalyzer, LayoutOptions};
use crate::model::{Extraction, NoTextReason};
use crate::ocr::{OcrEngine, OcrOutput, ScanImage};

/// Options for a pipeline.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Layout analysis options
    pub layout: LayoutOptions,

    /// Whether batches use parallel processing
    pub parallel: bool,
}

impl PipelineOptions {
    /// Create new pipeline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set layout options.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// Enable or disable parallel batch processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            layout: LayoutOptions::default(),
            parallel: true,
        }
    }
}

/// Outcome for one file of a batch.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Input path
    pub path: PathBuf,
    /// Extraction or the error that stopped this file
    pub result: Result<Extraction>,
}

/// OCR plus layout reconstruction for scanned images.
pub struct Pipeline<E: OcrEngine> {
    engine: E,
    analyzer: LayoutAnalyzer,
    parallel: bool,
}

impl<E: OcrEngine> Pipeline<E> {
    /// Create a pipeline around an engine.
    pub fn new(engine: E, options: PipelineOptions) -> Result<Self> {
        let analyzer = LayoutAnalyzer::new(options.layout)?;
        Ok(Self {
            engine,
            analyzer,
            parallel: options.parallel,
        })
    }

    /// The engine in use.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The layout analyzer in use.
    pub fn analyzer(&self) -> &LayoutAnalyzer {
        &self.analyzer
    }

    /// Process an image file.
    pub fn process_path(&self, path: impl AsRef<Path>) -> Result<Extraction> {
        let image = ScanImage::open(path)?;
        self.process_image(&image)
    }

    /// Process encoded image bytes.
    pub fn process_bytes(&self, bytes: impl Into<Vec<u8>>) -> Result<Extraction> {
        let image = ScanImage::from_bytes(bytes.into())?;
        self.process_image(&image)
    }

    /// Process an already-validated image.
    ///
    /// Engine failures are returned as errors. Output the engine could not
    /// interpret becomes [`NoTextReason::MalformedOcrOutput`].
    pub fn process_image(&self, image: &ScanImage) -> Result<Extraction> {
        let output = match self.engine.recognize(image) {
            Ok(output) => output,
            Err(Error::MalformedOcrOutput(detail)) => {
                log::warn!("{}: malformed OCR output: {}", self.engine.name(), detail);
                return Ok(Extraction::NoText(NoTextReason::MalformedOcrOutput(detail)));
            }
            Err(e) => return Err(e),
        };

        let mut extraction = self.process_output(&output);
        if let Extraction::Document(doc) = &mut extraction {
            let meta = &mut doc.metadata;
            meta.source = image.source().map(|p| p.display().to_string());
            meta.format = Some(image.format());
            meta.width = Some(image.width());
            meta.height = Some(image.height());
            meta.engine = Some(self.engine.name().to_string());
        }
        Ok(extraction)
    }

    /// Run layout reconstruction on OCR output directly.
    pub fn process_output(&self, output: &OcrOutput) -> Extraction {
        self.analyzer.analyze(output)
    }

    /// Process several image files independently.
    ///
    /// Outcomes are returned in input order. A failing file does not stop
    /// the others.
    pub fn process_batch<P>(&self, paths: &[P]) -> Vec<BatchOutcome>
    where
        P: AsRef<Path> + Sync,
    {
        self.process_batch_with(paths, |_| {})
    }

    /// Process several image files, calling `on_done` after each one.
    pub fn process_batch_with<P, F>(&self, paths: &[P], on_done: F) -> Vec<BatchOutcome>
    where
        P: AsRef<Path> + Sync,
        F: Fn(&BatchOutcome) + Sync,
    {
        let run = |path: &P| {
            let outcome = BatchOutcome {
                path: path.as_ref().to_path_buf(),
                result: self.process_path(path),
            };
            on_done(&outcome);
            outcome
        };

        log::debug!(
            "process_batch: {} files ({})",
            paths.len(),
            if self.parallel { "parallel" } else { "sequential" }
        );

        if self.parallel {
            paths.par_iter().map(run).collect()
        } else {
            paths.iter().map(run).collect()
        }
    }
}
