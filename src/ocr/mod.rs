//! OCR engine boundary.
//!
//! Text detection and recognition are delegated to an [`OcrEngine`]. Engines
//! receive a decoded-and-validated [`ScanImage`] and return raw parallel
//! arrays in an [`OcrOutput`]; everything after that is layout analysis.

mod paddle;
mod tesseract;

pub use paddle::PaddleJsonEngine;
pub use tesseract::TesseractEngine;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::detect::{detect_format_from_bytes, ImageFormat};
use crate::error::{Error, Result};

/// An OCR engine that turns an image into recognized text fragments.
///
/// One engine instance is shared across a batch, so implementations must be
/// thread-safe.
pub trait OcrEngine: Send + Sync {
    /// Short engine name, recorded in document metadata.
    fn name(&self) -> &str;

    /// Recognize text on the image.
    ///
    /// Returns [`Error::MalformedOcrOutput`] when the engine produced a result
    /// it cannot interpret.
    fn recognize(&self, image: &ScanImage) -> Result<OcrOutput>;
}

impl<E: OcrEngine + ?Sized> OcrEngine for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn recognize(&self, image: &ScanImage) -> Result<OcrOutput> {
        (**self).recognize(image)
    }
}

impl<E: OcrEngine + ?Sized> OcrEngine for &E {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn recognize(&self, image: &ScanImage) -> Result<OcrOutput> {
        (**self).recognize(image)
    }
}

/// A scanned image that has been checked to decode.
#[derive(Debug, Clone)]
pub struct ScanImage {
    bytes: Vec<u8>,
    format: ImageFormat,
    width: u32,
    height: u32,
    source: Option<PathBuf>,
}

impl ScanImage {
    /// Validate encoded image bytes.
    ///
    /// The format is detected by signature and the data is fully decoded once
    /// to make sure it is readable.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let format = detect_format_from_bytes(&bytes)
            .map_err(|_| Error::UnreadableImage("unsupported image format".to_string()))?;

        let decoded = image::load_from_memory_with_format(&bytes, format.to_image_format())
            .map_err(|e| Error::UnreadableImage(e.to_string()))?;

        log::debug!(
            "ScanImage: {} {}x{} ({} bytes)",
            format,
            decoded.width(),
            decoded.height(),
            bytes.len()
        );

        Ok(Self {
            width: decoded.width(),
            height: decoded.height(),
            bytes,
            format,
            source: None,
        })
    }

    /// Read and validate an image file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let mut image = Self::from_bytes(bytes)?;
        image.source = Some(path.to_path_buf());
        Ok(image)
    }

    /// Attach a source path (used by engines that look up sidecar files).
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Encoded image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Detected format.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Source path, when the image was read from disk.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Raw recognition result as parallel arrays.
///
/// `boxes` are axis-aligned rectangles `[x_min, y_min, x_max, y_max]`.
/// Missing scores count as full confidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrOutput {
    /// Recognized text fragments
    pub texts: Vec<String>,

    /// One rectangle per fragment
    pub boxes: Vec<[f64; 4]>,

    /// One confidence in [0, 1] per fragment
    pub scores: Option<Vec<f64>>,
}

/// One recognized fragment borrowed from an [`OcrOutput`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OcrEntry<'a> {
    /// Raw text
    pub text: &'a str,
    /// Rectangle `[x_min, y_min, x_max, y_max]`
    pub rect: [f64; 4],
    /// Confidence
    pub score: f64,
}

impl OcrOutput {
    /// Create an empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment with its confidence.
    pub fn push(&mut self, text: impl Into<String>, rect: [f64; 4], score: f64) {
        let filled = self.texts.len();
        self.texts.push(text.into());
        self.boxes.push(rect);
        self.scores
            .get_or_insert_with(|| vec![1.0; filled])
            .push(score);
    }

    /// Number of usable fragments (the shortest of the arrays).
    pub fn len(&self) -> usize {
        let n = self.texts.len().min(self.boxes.len());
        match &self.scores {
            Some(scores) => n.min(scores.len()),
            None => n,
        }
    }

    /// Check if there is nothing to read.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if every array has the same length.
    pub fn is_consistent(&self) -> bool {
        self.texts.len() == self.boxes.len()
            && self
                .scores
                .as_ref()
                .map_or(true, |s| s.len() == self.texts.len())
    }

    /// Iterate over fragments, zipped to the shortest array.
    pub fn entries(&self) -> impl Iterator<Item = OcrEntry<'_>> {
        let scores = self.scores.as_deref();
        self.texts
            .iter()
            .zip(&self.boxes)
            .enumerate()
            .take(self.len())
            .map(move |(i, (text, rect))| OcrEntry {
                text,
                rect: *rect,
                score: scores.and_then(|s| s.get(i)).copied().unwrap_or(1.0),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([255, 255, 255]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_scan_image_from_bytes() {
        let image = ScanImage::from_bytes(png_bytes(12, 7)).unwrap();
        assert_eq!(image.format(), ImageFormat::Png);
        assert_eq!(image.width(), 12);
        assert_eq!(image.height(), 7);
        assert!(image.source().is_none());
    }

    #[test]
    fn test_scan_image_rejects_unknown_format() {
        let err = ScanImage::from_bytes(b"plain text, not pixels".to_vec()).unwrap_err();
        assert!(matches!(err, Error::UnreadableImage(_)));
    }

    #[test]
    fn test_scan_image_rejects_truncated_data() {
        let mut bytes = png_bytes(32, 32);
        bytes.truncate(40);
        let err = ScanImage::from_bytes(bytes).unwrap_err();
        assert!(matches!(err, Error::UnreadableImage(_)));
    }

    #[test]
    fn test_output_push_fills_scores() {
        let mut output = OcrOutput {
            texts: vec!["a".into()],
            boxes: vec![[0.0, 0.0, 1.0, 1.0]],
            scores: None,
        };
        output.push("b", [2.0, 0.0, 3.0, 1.0], 0.5);
        assert_eq!(output.scores, Some(vec![1.0, 0.5]));
        assert!(output.is_consistent());
    }

    #[test]
    fn test_entries_default_score() {
        let output = OcrOutput {
            texts: vec!["a".into(), "b".into()],
            boxes: vec![[0.0, 0.0, 1.0, 1.0], [2.0, 0.0, 3.0, 1.0]],
            scores: None,
        };
        let entries: Vec<_> = output.entries().collect();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.score == 1.0));
    }

    #[test]
    fn test_entries_zip_to_shortest() {
        let output = OcrOutput {
            texts: vec!["a".into(), "b".into(), "c".into()],
            boxes: vec![[0.0; 4], [0.0; 4]],
            scores: Some(vec![0.9]),
        };
        assert!(!output.is_consistent());
        assert_eq!(output.len(), 1);
        assert_eq!(output.entries().count(), 1);
    }
}
