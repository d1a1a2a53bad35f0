//! Raster image format detection and validation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Raster formats accepted as scan input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Portable Network Graphics
    Png,
    /// JPEG / JFIF
    Jpeg,
    /// Graphics Interchange Format
    Gif,
    /// Windows bitmap
    Bmp,
    /// Tagged Image File Format (little- or big-endian)
    Tiff,
    /// WebP (RIFF container)
    WebP,
}

impl ImageFormat {
    /// Conventional file extension, lowercase without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Tiff => "tiff",
            ImageFormat::WebP => "webp",
        }
    }

    /// The matching decoder format of the `image` crate.
    pub(crate) fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
            ImageFormat::Tiff => image::ImageFormat::Tiff,
            ImageFormat::WebP => image::ImageFormat::WebP,
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Gif => "GIF",
            ImageFormat::Bmp => "BMP",
            ImageFormat::Tiff => "TIFF",
            ImageFormat::WebP => "WebP",
        };
        f.write_str(name)
    }
}

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_MAGIC: &[u8] = b"\xFF\xD8\xFF";
const GIF87_MAGIC: &[u8] = b"GIF87a";
const GIF89_MAGIC: &[u8] = b"GIF89a";
const BMP_MAGIC: &[u8] = b"BM";
const TIFF_LE_MAGIC: &[u8] = b"II*\x00";
const TIFF_BE_MAGIC: &[u8] = b"MM\x00*";
const RIFF_MAGIC: &[u8] = b"RIFF";
const WEBP_TAG: &[u8] = b"WEBP";

/// Bytes needed to tell every supported format apart.
const HEADER_LEN: usize = 16;

/// Detect the image format of a file.
///
/// Only the first few bytes are read.
///
/// # Example
/// ```no_run
/// use unscan::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("scan.png").unwrap();
/// println!("Format: {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<ImageFormat> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(HEADER_LEN);
    file.take(HEADER_LEN as u64).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the image format from the leading bytes of a file.
///
/// # Returns
/// * `Ok(ImageFormat)` if the data starts with a known signature
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<ImageFormat> {
    if data.starts_with(PNG_MAGIC) {
        return Ok(ImageFormat::Png);
    }
    if data.starts_with(JPEG_MAGIC) {
        return Ok(ImageFormat::Jpeg);
    }
    if data.starts_with(GIF87_MAGIC) || data.starts_with(GIF89_MAGIC) {
        return Ok(ImageFormat::Gif);
    }
    if data.starts_with(TIFF_LE_MAGIC) || data.starts_with(TIFF_BE_MAGIC) {
        return Ok(ImageFormat::Tiff);
    }
    if data.len() >= 12 && data.starts_with(RIFF_MAGIC) && &data[8..12] == WEBP_TAG {
        return Ok(ImageFormat::WebP);
    }
    // "BM" alone is a weak signature; require a full file header.
    if data.len() >= 14 && data.starts_with(BMP_MAGIC) {
        return Ok(ImageFormat::Bmp);
    }

    Err(Error::UnknownFormat)
}

/// Check if a file is a supported image.
pub fn is_image<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes start with a supported image signature.
pub fn is_image_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
