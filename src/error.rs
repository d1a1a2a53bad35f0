//! Error types for unscan library.

use std::io;
use thiserror::Error;

/// Result type alias for unscan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while processing a scanned image.
///
/// "No text detected" is not an error; see [`crate::Extraction::NoText`].
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not a recognized raster image.
    #[error("Unknown file format: not a supported image")]
    UnknownFormat,

    /// The image could not be decoded.
    #[error("Failed to read the image: {0}")]
    UnreadableImage(String),

    /// The OCR engine failed to run.
    #[error("OCR engine error: {0}")]
    Ocr(String),

    /// The OCR engine returned a result shape that cannot be interpreted.
    #[error("Malformed OCR output: {0}")]
    MalformedOcrOutput(String),

    /// A configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error during rendering (report, Markdown, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedOcrOutput(err.to_string())
    }
}
