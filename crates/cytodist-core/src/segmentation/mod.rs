//! Channel segmentation: automatic global thresholding and noise removal.
//!
//! A channel plane becomes a binary object mask in three steps: Otsu
//! threshold selection over a 256-bin intensity histogram, strict
//! greater-than binarization, and removal of connected components below the
//! configured minimum pixel area.


use crate::channels::ChannelPlane;
use crate::error::Error;
use crate::labeling::label_components;
use crate::models::Connectivity;

const HISTOGRAM_BINS: usize = 256;

/// A binary object mask with the same dimensions as its source plane.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryMask {
    pub width: u32,
    pub height: u32,
    /// Row-major; `true` = foreground.
    pub data: Vec<bool>,
}

impl BinaryMask {
    pub fn new_background(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![false; (width as usize) * (height as usize)],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        self.data[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        self.data[(y * self.width + x) as usize] = value;
    }

    /// Number of foreground pixels.
    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }
}

/// Parameters for one segmentation call.
#[derive(Debug, Clone, Copy)]
pub struct SegmentationParams {
    /// Components smaller than this pixel count are cleared (0 disables).
    pub min_object_size: usize,
    pub connectivity: Connectivity,
}

/// Compute the Otsu threshold of a plane: the intensity cut maximizing
/// between-class variance over a 256-bin histogram of the clamped 0.0-1.0
/// samples.
///
/// The returned value is the upper edge of the last background bin, so
/// binarizing with strict `>` reproduces the optimal bipartition exactly.
/// A degenerate histogram (uniform plane, no bipartition) returns 1.0, which
/// segments to all background.
pub fn otsu_threshold(plane: &ChannelPlane) -> f64 {
    let mut histogram = [0usize; HISTOGRAM_BINS];
    let total_pixels = plane.data.len() as f64;

    for &sample in &plane.data {
        let bin = (sample.clamp(0.0, 1.0) * (HISTOGRAM_BINS - 1) as f32) as usize;
        histogram[bin] += 1;
    }

    let mut weighted_sum = 0.0;
    for (i, &count) in histogram.iter().enumerate() {
        weighted_sum += i as f64 * count as f64;
    }

    let mut sum_background = 0.0;
    let mut weight_background = 0.0;
    let mut max_variance = 0.0;
    let mut best_bin = None;

    for (i, &count) in histogram.iter().enumerate() {
        weight_background += count as f64;
        if weight_background == 0.0 {
            continue;
        }

        let weight_foreground = total_pixels - weight_background;
        if weight_foreground == 0.0 {
            break;
        }

        sum_background += i as f64 * count as f64;
        let mean_background = sum_background / weight_background;
        let mean_foreground = (weighted_sum - sum_background) / weight_foreground;

        let variance = weight_background
            * weight_foreground
            * (mean_background - mean_foreground).powi(2);

        if variance > max_variance {
            max_variance = variance;
            best_bin = Some(i);
        }
    }

    match best_bin {
        // Background class is bins 0..=i; its upper edge separates the classes.
        Some(i) => (i + 1) as f64 / (HISTOGRAM_BINS - 1) as f64,
        None => 1.0,
    }
}

/// Binarize a plane: foreground iff intensity strictly exceeds the threshold.
pub fn binarize(plane: &ChannelPlane, threshold: f64) -> BinaryMask {
    BinaryMask {
        width: plane.width,
        height: plane.height,
        data: plane.data.iter().map(|&v| v as f64 > threshold).collect(),
    }
}

/// Clear every connected component with fewer than `min_size` pixels.
pub fn remove_small_objects(mask: &mut BinaryMask, min_size: usize, connectivity: Connectivity) {
    if min_size == 0 {
        return;
    }

    for component in label_components(mask, connectivity) {
        if component.area < min_size {
            for &(x, y) in &component.coords {
                mask.set(x, y, false);
            }
        }
    }
}

/// Segment a channel plane into a binary object mask.
///
/// Fails with [`Error::EmptyImage`] on a zero-area plane.
pub fn segment(plane: &ChannelPlane, params: &SegmentationParams) -> Result<BinaryMask, Error> {
    if plane.is_empty() {
        return Err(Error::EmptyImage);
    }

    let threshold = otsu_threshold(plane);
    let mut mask = binarize(plane, threshold);
    remove_small_objects(&mut mask, params.min_object_size, params.connectivity);
    Ok(mask)
}
