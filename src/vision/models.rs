// Vision models and upload validation
// Author: kelexine (https://github.com/kelexine)

use crate::error::{RelayError, Result};
use std::path::Path;

/// Extensions accepted on upload, in the order they are reported to clients.
pub const ALLOWED_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp"];

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
    WebP,
}

impl ImageFormat {
    /// Get MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::WebP => "image/webp",
        }
    }

    /// Detect format from a file extension (without the dot), ignoring case
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "bmp" => Some(ImageFormat::Bmp),
            "webp" => Some(ImageFormat::WebP),
            _ => None,
        }
    }

    /// Detect format from the last extension of a filename
    pub fn from_filename(filename: &str) -> Option<Self> {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// Validate an uploaded image.
///
/// Checks run in a fixed order: empty filename, then size, then extension.
/// `len` is the full length of the uploaded part; exactly `max_bytes` passes.
pub fn validate_upload(filename: &str, len: usize, max_bytes: usize) -> Result<ImageFormat> {
    if filename.is_empty() {
        return Err(RelayError::EmptyFile);
    }

    if len > max_bytes {
        return Err(RelayError::TooLarge);
    }

    ImageFormat::from_filename(filename)
        .ok_or_else(|| RelayError::UnsupportedFormat(ALLOWED_EXTENSIONS.join(", ")))
}
