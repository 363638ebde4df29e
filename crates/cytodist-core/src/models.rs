//! Shared data models for analyses, statistics, and batch results.

use core::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Connectivity rule for connected-component labeling.
///
/// One rule is used consistently through a run; the default matches the
/// original workflow (diagonal neighbors connect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    /// Horizontal and vertical neighbors only.
    Four,
    /// Horizontal, vertical, and diagonal neighbors.
    #[default]
    Eight,
}

/// What the batch aggregator does when a single image fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// First per-image error fails the whole batch.
    #[default]
    Abort,
    /// Record the failure against that image and keep going.
    Continue,
}

/// The analysis run against each image of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    /// Count and area (µm²) of lipid droplets.
    DropletArea,
    /// Nearest-edge distance from each lipid droplet to the cell nuclei.
    NucleusDistance,
    /// Nearest-edge distance from each lipid droplet to the mitochondria.
    MitochondriaDistance,
    /// Nearest-edge distances from lipid droplets and mitochondria to the
    /// microtubule network.
    MicrotubuleDistance,
}

/// A statistic that may be undefined for an empty measurement list.
///
/// An explicit tag instead of NaN or a magic sentinel, so downstream
/// consumers can tell "object touches reference" (a measured 0) apart from
/// "no objects to measure".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Measured(f64),
    NotApplicable,
}

impl Stat {
    pub fn as_measured(&self) -> Option<f64> {
        match self {
            Self::Measured(v) => Some(*v),
            Self::NotApplicable => None,
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Measured(v) => write!(f, "{}", v),
            Self::NotApplicable => write!(f, "n/a"),
        }
    }
}

/// Aggregate statistics over one measurement list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// Number of measurements.
    pub count: usize,
    /// Sum of all measurements (0.0 when empty).
    pub total: f64,
    /// Arithmetic mean, or `NotApplicable` when empty.
    pub mean: Stat,
    /// Minimum, or `NotApplicable` when empty.
    pub min: Stat,
}

impl Summary {
    pub fn from_values(values: &[f64]) -> Self {
        let count = values.len();
        let total: f64 = values.iter().sum();

        if count == 0 {
            return Self {
                count: 0,
                total: 0.0,
                mean: Stat::NotApplicable,
                min: Stat::NotApplicable,
            };
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        Self {
            count,
            total,
            mean: Stat::Measured(total / count as f64),
            min: Stat::Measured(min),
        }
    }
}

/// One named list of per-object measurements with its summary.
///
/// Values are in physical units (µm or µm²) and appear in component-label
/// order, so index `i` is object ordinal `i + 1` in the detail report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementSeries {
    /// Report column label, e.g. `lipid_to_nucleus_um`.
    pub label: String,
    /// Per-object values in component order.
    pub values: Vec<f64>,
    pub summary: Summary,
}

impl MeasurementSeries {
    pub fn new(label: &str, values: Vec<f64>) -> Self {
        let summary = Summary::from_values(&values);
        Self {
            label: label.to_string(),
            values,
            summary,
        }
    }
}

/// All measurements for one image. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageResult {
    /// Source file name (with extension), the image's identity in reports.
    pub file_name: String,
    pub series: Vec<MeasurementSeries>,
}

/// A per-image failure recorded under [`FailurePolicy::Continue`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of one batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchOutcome {
    /// Successful results, in input file order.
    pub results: Vec<ImageResult>,
    /// Failures, in input file order (empty under `Abort`).
    pub failures: Vec<ImageFailure>,
}
