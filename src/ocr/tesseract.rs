//! Tesseract command-line engine.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use super::{OcrEngine, OcrOutput, ScanImage};
use crate::error::{Error, Result};

/// TSV level of word entries.
const WORD_LEVEL: &str = "5";

/// Column count of tesseract's TSV output.
const TSV_COLUMNS: usize = 12;

/// Runs the `tesseract` binary and reads its word-level TSV output.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    binary: PathBuf,
    language: String,
    psm: u8,
}

impl TesseractEngine {
    /// Create an engine using `tesseract` from `PATH`, English, automatic page segmentation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path to the tesseract binary.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Set the recognition language (e.g. `eng`, `eng+deu`).
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the page segmentation mode.
    pub fn with_psm(mut self, psm: u8) -> Self {
        self.psm = psm;
        self
    }

    fn run(&self, image: &ScanImage) -> Result<String> {
        let mut child = Command::new(&self.binary)
            .args(["stdin", "stdout", "-l", &self.language, "--psm"])
            .arg(self.psm.to_string())
            .arg("tsv")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                Error::Ocr(format!(
                    "failed to run {}: {}",
                    self.binary.display(),
                    e
                ))
            })?;

        // stdin is written from its own thread while stdout drains.
        let writer = child.stdin.take().map(|mut stdin| {
            let bytes = image.bytes().to_vec();
            std::thread::spawn(move || stdin.write_all(&bytes))
        });

        let output = child
            .wait_with_output()
            .map_err(|e| Error::Ocr(format!("tesseract did not finish: {}", e)))?;

        if let Some(handle) = writer {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => log::warn!("tesseract: failed to write image: {}", e),
                Err(_) => log::warn!("tesseract: stdin writer panicked"),
            }
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(Error::Ocr(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        if !stderr.trim().is_empty() {
            log::warn!("tesseract: {}", stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("tesseract"),
            language: "eng".to_string(),
            psm: 3,
        }
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn recognize(&self, image: &ScanImage) -> Result<OcrOutput> {
        let tsv = self.run(image)?;
        parse_tsv(&tsv)
    }
}

/// Parse tesseract TSV output into word fragments.
///
/// Only word rows are kept. Confidence is rescaled from 0-100 to 0-1; rows
/// with confidence -1 or empty text are skipped.
pub(crate) fn parse_tsv(tsv: &str) -> Result<OcrOutput> {
    let mut lines = tsv.lines();

    match lines.next() {
        Some(header) if header.starts_with("level") => {}
        Some(_) => {
            return Err(Error::MalformedOcrOutput(
                "tesseract TSV is missing its header".to_string(),
            ))
        }
        None => return Ok(OcrOutput::new()),
    }

    let mut output = OcrOutput::new();
    for (line_no, line) in lines.enumerate() {
        if line.is_empty() {
            continue;
        }

        let cols: Vec<&str> = line.splitn(TSV_COLUMNS, '\t').collect();
        if cols.len() < TSV_COLUMNS - 1 {
            return Err(Error::MalformedOcrOutput(format!(
                "tesseract TSV line {} has {} columns",
                line_no + 2,
                cols.len()
            )));
        }
        if cols[0] != WORD_LEVEL {
            continue;
        }

        let text = cols.get(11).copied().unwrap_or("");
        let number = |i: usize| -> Result<f64> {
            cols[i].trim().parse::<f64>().map_err(|_| {
                Error::MalformedOcrOutput(format!(
                    "tesseract TSV line {}: bad number {:?}",
                    line_no + 2,
                    cols[i]
                ))
            })
        };

        let conf = number(10)?;
        if conf < 0.0 || text.trim().is_empty() {
            continue;
        }

        let (left, top, width, height) = (number(6)?, number(7)?, number(8)?, number(9)?);
        output.push(
            text,
            [left, top, left + width, top + height],
            (conf / 100.0).clamp(0.0, 1.0),
        );
    }

    log::debug!("tesseract: parsed {} words", output.len());
    Ok(output)
}
