//! Nearest-edge distance evaluation between object populations.
//!
//! For each labeled component of a source population, the nearest-edge
//! distance to a reference population is the minimum of the reference
//! distance field over the component's pixel coordinates, converted to
//! micrometers.

use crate::distance::DistanceField;
use crate::labeling::LabeledComponent;

/// Minimum distance-field value per component, times the pixel-to-micron
/// factor. One value per component, in input order; an empty source
/// population yields an empty list.
///
/// The field must come from a mask with the same dimensions as the mask the
/// components were labeled from.
pub fn nearest_edge_distances(
    components: &[LabeledComponent],
    field: &DistanceField,
    pixel_to_micron: f64,
) -> Vec<f64> {
    components
        .iter()
        .map(|component| {
            debug_assert!(!component.coords.is_empty());
            let min_px = component
                .coords
                .iter()
                .map(|&(x, y)| field.get(x, y))
                .fold(f64::INFINITY, f64::min);
            min_px * pixel_to_micron
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::distance_field;
    use crate::labeling::label_components;
    use crate::models::{Connectivity, Stat, Summary};
    use crate::segmentation::BinaryMask;

    #[test]
    fn empty_source_population_yields_empty_list() {
        let mut reference = BinaryMask::new_background(4, 4);
        reference.set(0, 0, true);
        let field = distance_field(&reference).unwrap();

        let distances = nearest_edge_distances(&[], &field, 1.0);
        assert!(distances.is_empty());

        let summary = Summary::from_values(&distances);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean, Stat::NotApplicable);
    }

    #[test]
    fn component_overlapping_reference_measures_zero() {
        let mut source = BinaryMask::new_background(6, 6);
        let mut reference = BinaryMask::new_background(6, 6);
        for (x, y) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
            source.set(x, y, true);
            reference.set(x, y, true);
        }

        let components = label_components(&source, Connectivity::Eight);
        let field = distance_field(&reference).unwrap();
        let distances = nearest_edge_distances(&components, &field, 2.5);
        assert_eq!(distances, vec![0.0]);
    }

    #[test]
    fn corner_square_to_far_pixel_scenario() {
        // 3x3 foreground square at (0,0) measured against a single reference
        // pixel at (9,9): the square's closest pixel is (2,2), so the
        // nearest-edge distance is sqrt(7^2 + 7^2) pixels.
        let mut source = BinaryMask::new_background(10, 10);
        for y in 0..3 {
            for x in 0..3 {
                source.set(x, y, true);
            }
        }
        let mut reference = BinaryMask::new_background(10, 10);
        reference.set(9, 9, true);

        let factor = 36.9 / 1024.0;
        let components = label_components(&source, Connectivity::Eight);
        assert_eq!(components.len(), 1);

        let field = distance_field(&reference).unwrap();
        let distances = nearest_edge_distances(&components, &field, factor);

        let expected = 98.0f64.sqrt() * factor;
        assert_eq!(distances.len(), 1);
        assert!((distances[0] - expected).abs() < 1e-9);
    }

    #[test]
    fn distances_follow_component_order() {
        let mut source = BinaryMask::new_background(8, 1);
        source.set(0, 0, true);
        source.set(4, 0, true);
        let mut reference = BinaryMask::new_background(8, 1);
        reference.set(7, 0, true);

        let components = label_components(&source, Connectivity::Eight);
        let field = distance_field(&reference).unwrap();
        let distances = nearest_edge_distances(&components, &field, 1.0);
        assert_eq!(distances, vec![7.0, 3.0]);
    }

    #[test]
    fn unit_conversion_round_trips() {
        let factor = 36.9 / 1024.0;
        let pixels = 42.0f64;
        let microns = pixels * factor;
        assert!((microns / factor - pixels).abs() < 1e-9);

        let area_px = 50.0f64;
        let area_um2 = area_px * factor * factor;
        assert!((area_um2 / (factor * factor) - area_px).abs() < 1e-9);
    }
}
