//! TIFF image decoder

use std::path::Path;

use super::DecodedImage;
use crate::error::Error;

/// Decode a TIFF file
pub(crate) fn decode_tiff<P: AsRef<Path>>(path: P) -> Result<DecodedImage, Error> {
    use std::fs::File;
    use std::io::BufReader;
    use tiff::decoder::Limits;

    let file = File::open(path.as_ref())
        .map_err(|e| Error::Decode(format!("failed to open TIFF file: {}", e)))?;

    // Raise limits for uncompressed high-resolution microscope exports
    let mut limits = Limits::default();
    limits.decoding_buffer_size = 1024 * 1024 * 1024; // 1GB
    limits.ifd_value_size = 1024 * 1024 * 1024;
    limits.intermediate_buffer_size = 1024 * 1024 * 1024;

    let mut decoder = tiff::decoder::Decoder::new(BufReader::new(file))
        .map_err(|e| Error::Decode(format!("failed to create TIFF decoder: {}", e)))?
        .with_limits(limits);

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| Error::Decode(format!("failed to get TIFF dimensions: {}", e)))?;

    let color_type = decoder
        .colortype()
        .map_err(|e| Error::Decode(format!("failed to get TIFF color type: {}", e)))?;

    let channels = match color_type {
        tiff::ColorType::Gray(_) => 1u8,
        tiff::ColorType::RGB(_) => 3,
        tiff::ColorType::RGBA(_) => 4,
        other => {
            return Err(Error::Decode(format!(
                "unsupported TIFF color type: {:?}",
                other
            )))
        }
    };

    let image_data = decoder
        .read_image()
        .map_err(|e| Error::Decode(format!("failed to read TIFF image data: {}", e)))?;

    // Normalize every sample format to f32 in 0.0-1.0
    let data: Vec<f32> = match image_data {
        tiff::decoder::DecodingResult::U8(buf) => {
            buf.iter().map(|&v| v as f32 / u8::MAX as f32).collect()
        }
        tiff::decoder::DecodingResult::U16(buf) => {
            buf.iter().map(|&v| v as f32 / u16::MAX as f32).collect()
        }
        tiff::decoder::DecodingResult::U32(buf) => buf
            .iter()
            .map(|&v| (v as f64 / u32::MAX as f64) as f32)
            .collect(),
        tiff::decoder::DecodingResult::F32(buf) => {
            buf.iter().map(|&v| v.clamp(0.0, 1.0)).collect()
        }
        tiff::decoder::DecodingResult::F64(buf) => {
            buf.iter().map(|&v| v.clamp(0.0, 1.0) as f32).collect()
        }
        _ => {
            return Err(Error::Decode(
                "unsupported TIFF sample format".to_string(),
            ))
        }
    };

    let expected = (width as usize) * (height as usize) * (channels as usize);
    if data.len() != expected {
        return Err(Error::Decode(format!(
            "TIFF data length {} does not match {}x{}x{}",
            data.len(),
            width,
            height,
            channels
        )));
    }

    Ok(DecodedImage {
        width,
        height,
        channels,
        data,
    })
}
