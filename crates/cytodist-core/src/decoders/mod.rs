//! Image decoders.
//!
//! Batch inputs are fluorescence microscopy exports in TIFF format; the
//! decoder normalizes every sample format to interleaved f32 in 0.0-1.0.

mod tiff;


use std::path::Path;

use crate::error::Error;

/// Decoded image data
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Number of channels (1 for grayscale exports, 3 for RGB, 4 for RGBA)
    pub channels: u8,

    /// Interleaved intensity samples (f32, 0.0-1.0 range)
    pub data: Vec<f32>,
}

impl DecodedImage {
    /// Pixel count of one channel plane.
    pub fn plane_len(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

/// Decode an image from a file path.
pub fn decode_image<P: AsRef<Path>>(path: P) -> Result<DecodedImage, Error> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| Error::Decode("no file extension found".to_string()))?;

    match extension.as_str() {
        "tif" | "tiff" => tiff::decode_tiff(path),
        _ => Err(Error::Decode(format!(
            "unsupported file format: {}",
            extension
        ))),
    }
}
