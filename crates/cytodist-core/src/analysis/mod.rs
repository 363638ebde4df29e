//! Per-image analyses.
//!
//! Each analysis kind composes the core stages over one decoded image:
//! channel extraction, segmentation, component labeling, distance-field
//! construction, and proximity evaluation. Channel roles are resolved from
//! the run configuration, never hard-coded at call sites.


use crate::channels::extract_channel;
use crate::config::AnalysisConfig;
use crate::decoders::DecodedImage;
use crate::distance::distance_field;
use crate::error::Error;
use crate::labeling::label_components;
use crate::models::{AnalysisKind, ImageResult, MeasurementSeries};
use crate::proximity::nearest_edge_distances;
use crate::segmentation::segment;

/// Series labels used in reports.
pub const LIPID_AREA_LABEL: &str = "lipid_area_um2";
pub const LIPID_TO_NUCLEUS_LABEL: &str = "lipid_to_nucleus_um";
pub const LIPID_TO_MITOCHONDRIA_LABEL: &str = "lipid_to_mitochondria_um";
pub const LIPID_TO_MICROTUBULE_LABEL: &str = "lipid_to_microtubule_um";
pub const MITO_TO_MICROTUBULE_LABEL: &str = "mitochondria_to_microtubule_um";

/// Run one analysis over one decoded image.
///
/// Deterministic: an unchanged image and configuration yield a bit-identical
/// result.
pub fn analyze_image(
    image: &DecodedImage,
    file_name: &str,
    kind: AnalysisKind,
    config: &AnalysisConfig,
) -> Result<ImageResult, Error> {
    let series = match kind {
        AnalysisKind::DropletArea => vec![droplet_area_series(image, config)?],
        AnalysisKind::NucleusDistance => vec![distance_series(
            image,
            LIPID_TO_NUCLEUS_LABEL,
            config.nucleus_distance.source_channel,
            config.nucleus_distance.reference_channel,
            config,
        )?],
        AnalysisKind::MitochondriaDistance => vec![distance_series(
            image,
            LIPID_TO_MITOCHONDRIA_LABEL,
            config.mitochondria_distance.source_channel,
            config.mitochondria_distance.reference_channel,
            config,
        )?],
        AnalysisKind::MicrotubuleDistance => {
            let roles = config.microtubule_distance;
            vec![
                distance_series(
                    image,
                    LIPID_TO_MICROTUBULE_LABEL,
                    roles.lipid_channel,
                    roles.microtubule_channel,
                    config,
                )?,
                distance_series(
                    image,
                    MITO_TO_MICROTUBULE_LABEL,
                    roles.mitochondria_channel,
                    roles.microtubule_channel,
                    config,
                )?,
            ]
        }
    };

    Ok(ImageResult {
        file_name: file_name.to_string(),
        series,
    })
}

/// Segment the lipid channel and report per-droplet areas in µm².
fn droplet_area_series(
    image: &DecodedImage,
    config: &AnalysisConfig,
) -> Result<MeasurementSeries, Error> {
    let plane = extract_channel(image, config.droplet_area.lipid_channel)?;
    let mask = segment(&plane, &config.segmentation_params())?;
    let components = label_components(&mask, config.connectivity);

    let area_factor = config.area_factor();
    let areas: Vec<f64> = components
        .iter()
        .map(|component| component.area as f64 * area_factor)
        .collect();

    Ok(MeasurementSeries::new(LIPID_AREA_LABEL, areas))
}

/// Segment a source and a reference channel and report per-source-object
/// nearest-edge distances to the reference population, in µm.
fn distance_series(
    image: &DecodedImage,
    label: &str,
    source_channel: usize,
    reference_channel: usize,
    config: &AnalysisConfig,
) -> Result<MeasurementSeries, Error> {
    let params = config.segmentation_params();

    let source_plane = extract_channel(image, source_channel)?;
    let source_mask = segment(&source_plane, &params)?;
    let components = label_components(&source_mask, config.connectivity);

    let reference_plane = extract_channel(image, reference_channel)?;
    let reference_mask = segment(&reference_plane, &params)?;
    let field = distance_field(&reference_mask)?;

    let distances = nearest_edge_distances(&components, &field, config.pixel_to_micron);
    Ok(MeasurementSeries::new(label, distances))
}
