//! Channel extraction from decoded multi-channel images.

use crate::decoders::DecodedImage;
use crate::error::Error;

/// One 2-D intensity plane extracted from a decoded image.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelPlane {
    pub width: u32,
    pub height: u32,
    /// Row-major intensity samples, 0.0-1.0.
    pub data: Vec<f32>,
}

impl ChannelPlane {
    /// Build a plane from raw samples, validating the length.
    pub fn from_vec(width: u32, height: u32, data: Vec<f32>) -> Result<Self, Error> {
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::Decode(format!(
                "plane data length {} does not match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.data[(y * self.width + x) as usize]
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Extract one channel plane from a decoded image by channel index.
///
/// A single-channel image only serves index 0; any index at or past the
/// channel count fails with [`Error::InvalidChannel`].
pub fn extract_channel(image: &DecodedImage, index: usize) -> Result<ChannelPlane, Error> {
    if index >= image.channels as usize {
        return Err(Error::InvalidChannel {
            requested: index,
            available: image.channels,
        });
    }

    let stride = image.channels as usize;
    let data: Vec<f32> = image
        .data
        .iter()
        .skip(index)
        .step_by(stride)
        .copied()
        .collect();

    ChannelPlane::from_vec(image.width, image.height, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_image() -> DecodedImage {
        // 2x1 RGB: pixel 0 = (0.1, 0.2, 0.3), pixel 1 = (0.4, 0.5, 0.6)
        DecodedImage {
            width: 2,
            height: 1,
            channels: 3,
            data: vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6],
        }
    }

    #[test]
    fn extracts_interleaved_channels() {
        let image = rgb_image();
        let red = extract_channel(&image, 0).unwrap();
        let blue = extract_channel(&image, 2).unwrap();

        assert_eq!(red.data, vec![0.1, 0.4]);
        assert_eq!(blue.data, vec![0.3, 0.6]);
        assert_eq!(red.width, 2);
        assert_eq!(red.height, 1);
    }

    #[test]
    fn rejects_channel_past_count() {
        let image = rgb_image();
        let err = extract_channel(&image, 3).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidChannel {
                requested: 3,
                available: 3
            }
        );
    }

    #[test]
    fn single_channel_image_only_serves_index_zero() {
        let image = DecodedImage {
            width: 1,
            height: 2,
            channels: 1,
            data: vec![0.7, 0.8],
        };
        assert!(extract_channel(&image, 0).is_ok());
        assert!(matches!(
            extract_channel(&image, 1),
            Err(Error::InvalidChannel { .. })
        ));
    }
}
