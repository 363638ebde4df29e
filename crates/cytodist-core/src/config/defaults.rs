//! Default analysis parameter values and their validation/sanitization.

use serde::{Deserialize, Serialize};

use crate::models::{Connectivity, FailurePolicy};
use crate::segmentation::SegmentationParams;

/// Default pixel-to-micrometer conversion: a 1024-pixel field of view
/// spanning 36.9 µm on the reference microscope.
pub const DEFAULT_PIXEL_TO_MICRON: f64 = 36.9 / 1024.0;

/// Default minimum connected-component size in pixels.
pub const DEFAULT_MIN_OBJECT_SIZE: usize = 50;

/// Resolved configuration for one batch run.
///
/// Built from defaults, optionally overridden by a `cytodist.yml` file and
/// CLI flags, then passed into the batch aggregator by value. There is no
/// process-wide mutable analysis state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Length conversion factor; area conversion is its square.
    pub pixel_to_micron: f64,
    /// Components below this pixel count are treated as noise (0 disables).
    pub min_object_size: usize,
    /// Connectivity rule used for every labeling call of the run.
    pub connectivity: Connectivity,
    /// What the batch does when one image fails.
    pub failure_policy: FailurePolicy,
    /// Channel role mapping per analysis kind.
    pub droplet_area: DropletAreaChannels,
    pub nucleus_distance: PairChannels,
    pub mitochondria_distance: PairChannels,
    pub microtubule_distance: MicrotubuleChannels,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pixel_to_micron: DEFAULT_PIXEL_TO_MICRON,
            min_object_size: DEFAULT_MIN_OBJECT_SIZE,
            connectivity: Connectivity::Eight,
            failure_policy: FailurePolicy::Abort,
            droplet_area: DropletAreaChannels { lipid_channel: 0 },
            nucleus_distance: PairChannels {
                source_channel: 0,
                reference_channel: 2,
            },
            mitochondria_distance: PairChannels {
                source_channel: 0,
                reference_channel: 1,
            },
            microtubule_distance: MicrotubuleChannels {
                lipid_channel: 0,
                mitochondria_channel: 2,
                microtubule_channel: 1,
            },
        }
    }
}

impl AnalysisConfig {
    /// Clamp out-of-range values back to defaults.
    pub fn sanitize(&mut self) {
        if !self.pixel_to_micron.is_finite() || self.pixel_to_micron <= 0.0 {
            self.pixel_to_micron = DEFAULT_PIXEL_TO_MICRON;
        }
    }

    /// Area conversion factor (µm² per pixel).
    pub fn area_factor(&self) -> f64 {
        self.pixel_to_micron * self.pixel_to_micron
    }

    pub fn segmentation_params(&self) -> SegmentationParams {
        SegmentationParams {
            min_object_size: self.min_object_size,
            connectivity: self.connectivity,
        }
    }
}

/// Channel role for the droplet-area analysis (lipid droplets only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropletAreaChannels {
    pub lipid_channel: usize,
}

/// Channel roles for a source-vs-reference distance analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairChannels {
    pub source_channel: usize,
    pub reference_channel: usize,
}

/// Channel roles for the microtubule analysis: two source populations
/// measured against the same microtubule network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MicrotubuleChannels {
    pub lipid_channel: usize,
    pub mitochondria_channel: usize,
    pub microtubule_channel: usize,
}
