//! PaddleOCR result files.
//!
//! PaddleOCR's `save_to_json` writes one `<image stem>_res.json` per image.
//! This engine reads those files instead of running a model, which keeps the
//! Python toolchain out of the Rust process.

use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{OcrEngine, OcrOutput, ScanImage};
use crate::error::{Error, Result};

/// Where result files are looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ResultSource {
    /// `<stem>_res.json` next to the image, or in the given directory
    Sidecar(Option<PathBuf>),
    /// One fixed file for every image
    File(PathBuf),
}

/// Reads PaddleOCR JSON results for each image.
#[derive(Debug, Clone)]
pub struct PaddleJsonEngine {
    source: ResultSource,
}

impl PaddleJsonEngine {
    /// Look for `<stem>_res.json` next to each image.
    pub fn new() -> Self {
        Self {
            source: ResultSource::Sidecar(None),
        }
    }

    /// Look for `<stem>_res.json` inside `dir`.
    pub fn with_result_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            source: ResultSource::Sidecar(Some(dir.into())),
        }
    }

    /// Always read the given result file.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: ResultSource::File(path.into()),
        }
    }

    /// Resolve the result file for an image.
    pub fn result_path(&self, image: &ScanImage) -> Result<PathBuf> {
        match &self.source {
            ResultSource::File(path) => Ok(path.clone()),
            ResultSource::Sidecar(dir) => {
                let source = image.source().ok_or_else(|| {
                    Error::Ocr("in-memory image has no PaddleOCR result file".to_string())
                })?;
                let name = sidecar_name(source)?;
                let dir = match dir {
                    Some(dir) => dir.as_path(),
                    None => source.parent().unwrap_or_else(|| Path::new("")),
                };
                Ok(dir.join(name))
            }
        }
    }
}

impl Default for PaddleJsonEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for PaddleJsonEngine {
    fn name(&self) -> &str {
        "paddle-json"
    }

    fn recognize(&self, image: &ScanImage) -> Result<OcrOutput> {
        let path = self.result_path(image)?;
        log::debug!("paddle-json: reading {}", path.display());

        let json = std::fs::read_to_string(&path)
            .map_err(|e| Error::Ocr(format!("cannot read {}: {}", path.display(), e)))?;
        let value: Value = serde_json::from_str(&json)?;
        OcrOutput::from_paddle_json(&value)
    }
}

fn sidecar_name(image: &Path) -> Result<String> {
    let stem = image
        .file_stem()
        .ok_or_else(|| Error::Ocr(format!("{} has no file name", image.display())))?;
    Ok(format!("{}_res.json", stem.to_string_lossy()))
}

impl OcrOutput {
    /// Interpret a PaddleOCR prediction result.
    ///
    /// Accepts the result object itself, a list whose first element is the
    /// object, or the `{"res": {...}}` wrapper written by `save_to_json`.
    /// An empty list is an empty output.
    pub fn from_paddle_json(value: &Value) -> Result<Self> {
        let result = match value {
            Value::Array(items) => match items.first() {
                Some(first) => first,
                None => return Ok(Self::new()),
            },
            other => other,
        };
        let result = match result.get("res") {
            Some(inner) if inner.is_object() => inner,
            _ => result,
        };

        let object = result
            .as_object()
            .ok_or_else(|| malformed("result is not an object"))?;

        let texts = object
            .get("rec_texts")
            .and_then(Value::as_array)
            .ok_or_else(|| malformed("missing rec_texts"))?
            .iter()
            .map(|t| {
                t.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| malformed("rec_texts holds a non-string"))
            })
            .collect::<Result<Vec<_>>>()?;

        let boxes = object
            .get("rec_boxes")
            .and_then(Value::as_array)
            .ok_or_else(|| malformed("missing rec_boxes"))?
            .iter()
            .map(parse_rect)
            .collect::<Result<Vec<_>>>()?;

        let scores = match object.get("rec_scores") {
            None | Some(Value::Null) => None,
            Some(Value::Array(scores)) => Some(
                scores
                    .iter()
                    .map(|s| {
                        s.as_f64()
                            .ok_or_else(|| malformed("rec_scores holds a non-number"))
                    })
                    .collect::<Result<Vec<_>>>()?,
            ),
            Some(_) => return Err(malformed("rec_scores is not a list")),
        };

        Ok(Self {
            texts,
            boxes,
            scores,
        })
    }
}

fn parse_rect(value: &Value) -> Result<[f64; 4]> {
    let coords = value
        .as_array()
        .filter(|c| c.len() == 4)
        .ok_or_else(|| malformed("rec_boxes entry is not 4 numbers"))?;

    let mut rect = [0.0f64; 4];
    for (slot, coord) in rect.iter_mut().zip(coords) {
        *slot = coord
            .as_f64()
            .ok_or_else(|| malformed("rec_boxes entry is not 4 numbers"))?;
    }
    Ok(rect)
}

fn malformed(msg: &str) -> Error {
    Error::MalformedOcrOutput(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_paddle_json_object() {
        let value = json!({
            "rec_texts": ["Month", "Sales"],
            "rec_boxes": [[10, 10, 80, 30], [120, 12, 180, 30]],
            "rec_scores": [0.98, 0.95]
        });
        let output = OcrOutput::from_paddle_json(&value).unwrap();
        assert_eq!(output.texts, vec!["Month", "Sales"]);
        assert_eq!(output.boxes[1], [120.0, 12.0, 180.0, 30.0]);
        assert_eq!(output.scores.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_from_paddle_json_list_and_wrapper() {
        let value = json!([{ "res": {
            "rec_texts": ["Hello"],
            "rec_boxes": [[0.5, 1.0, 20.0, 9.5]]
        }}]);
        let output = OcrOutput::from_paddle_json(&value).unwrap();
        assert_eq!(output.texts, vec!["Hello"]);
        assert!(output.scores.is_none());
    }

    #[test]
    fn test_from_paddle_json_empty_list() {
        let output = OcrOutput::from_paddle_json(&json!([])).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_from_paddle_json_malformed() {
        for value in [
            json!("just a string"),
            json!({ "rec_texts": ["a"] }),
            json!({ "rec_texts": ["a"], "rec_boxes": [[1, 2, 3]] }),
            json!({ "rec_texts": [1], "rec_boxes": [[1, 2, 3, 4]] }),
            json!({ "rec_texts": ["a"], "rec_boxes": [[1, 2, 3, 4]], "rec_scores": "high" }),
        ] {
            assert!(
                matches!(
                    OcrOutput::from_paddle_json(&value),
                    Err(Error::MalformedOcrOutput(_))
                ),
                "accepted {}",
                value
            );
        }
    }

    #[test]
    fn test_sidecar_name() {
        assert_eq!(
            sidecar_name(Path::new("/scans/invoice.page1.png")).unwrap(),
            "invoice.page1_res.json"
        );
    }

    #[test]
    fn test_result_path_needs_source() {
        let img = image::RgbImage::from_pixel(2, 2, image::Rgb([0, 0, 0]));
        let mut buf = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        let scan = ScanImage::from_bytes(buf.into_inner()).unwrap();

        assert!(PaddleJsonEngine::new().result_path(&scan).is_err());
        assert_eq!(
            PaddleJsonEngine::from_file("fixed.json")
                .result_path(&scan)
                .unwrap(),
            PathBuf::from("fixed.json")
        );

        let scan = scan.with_source("/data/scan.png");
        assert_eq!(
            PaddleJsonEngine::with_result_dir("/out")
                .result_path(&scan)
                .unwrap(),
            PathBuf::from("/out/scan_res.json")
        );
        assert_eq!(
            PaddleJsonEngine::new().result_path(&scan).unwrap(),
            PathBuf::from("/data/scan_res.json")
        );
    }
}
