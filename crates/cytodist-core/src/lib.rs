//! Cytodist Core Library
//!
//! Core functionality for fluorescence microscopy segmentation and
//! inter-object distance measurement.

pub mod analysis;
pub mod batch;
pub mod channels;
pub mod config;
pub mod decoders;
pub mod distance;
pub mod error;
pub mod labeling;
pub mod models;
pub mod proximity;
pub mod report;
pub mod segmentation;

// Re-export commonly used types
pub use config::AnalysisConfig;
pub use error::Error;
pub use models::{
    AnalysisKind, BatchOutcome, Connectivity, FailurePolicy, ImageFailure, ImageResult,
    MeasurementSeries, Stat, Summary,
};
