//! Euclidean distance-field construction.
//!
//! Exact Euclidean distance transform using the Felzenszwalb-Huttenlocher
//! separable algorithm: a 1-D squared-distance transform (lower envelope of
//! parabolas) applied along rows and then columns, followed by a square root.

use crate::error::Error;
use crate::segmentation::BinaryMask;

/// Background initialization value for squared distances. Finite so the
/// parabola-envelope intersections stay well-defined on source-free lines.
const FAR: f64 = 1e18;

/// Per-pixel Euclidean distance (in pixels) to the nearest foreground pixel
/// of the mask the field was built from. Zero at foreground pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceField {
    pub width: u32,
    pub height: u32,
    /// Row-major distances, non-negative.
    pub data: Vec<f64>,
}

impl DistanceField {
    pub fn get(&self, x: u32, y: u32) -> f64 {
        self.data[(y * self.width + x) as usize]
    }
}

/// Build the Euclidean distance field of a binary mask.
///
/// The distance is undefined for a mask without foreground pixels; that case
/// fails with [`Error::EmptyReferenceMask`] so callers can apply the batch
/// failure policy instead of receiving an infinite sentinel.
pub fn distance_field(mask: &BinaryMask) -> Result<DistanceField, Error> {
    if !mask.data.iter().any(|&v| v) {
        return Err(Error::EmptyReferenceMask);
    }

    let width = mask.width as usize;
    let height = mask.height as usize;

    let mut dist_sq: Vec<f64> = mask
        .data
        .iter()
        .map(|&fg| if fg { 0.0 } else { FAR })
        .collect();

    // Row pass
    let mut line = vec![0.0f64; width.max(height)];
    for y in 0..height {
        let row = &mut dist_sq[y * width..(y + 1) * width];
        line[..width].copy_from_slice(row);
        edt_1d_squared(&line[..width], row);
    }

    // Column pass
    let mut column = vec![0.0f64; height];
    let mut transformed = vec![0.0f64; height];
    for x in 0..width {
        for y in 0..height {
            column[y] = dist_sq[y * width + x];
        }
        edt_1d_squared(&column, &mut transformed);
        for y in 0..height {
            dist_sq[y * width + x] = transformed[y];
        }
    }

    for value in &mut dist_sq {
        *value = value.sqrt();
    }

    Ok(DistanceField {
        width: mask.width,
        height: mask.height,
        data: dist_sq,
    })
}

/// 1-D squared distance transform via the lower envelope of parabolas
/// (Felzenszwalb & Huttenlocher). `f` holds input squared distances; the
/// result is written to `out` (same length).
fn edt_1d_squared(f: &[f64], out: &mut [f64]) {
    let n = f.len();
    debug_assert_eq!(n, out.len());
    if n == 0 {
        return;
    }

    let mut v = vec![0usize; n]; // parabola apex positions
    let mut z = vec![0.0f64; n + 1]; // envelope segment boundaries
    let mut k = 0usize;

    v[0] = 0;
    z[0] = f64::NEG_INFINITY;
    z[1] = f64::INFINITY;

    for q in 1..n {
        loop {
            let p = v[k] as f64;
            let qq = q as f64;
            let s = ((f[q] + qq * qq) - (f[v[k]] + p * p)) / (2.0 * qq - 2.0 * p);

            if s > z[k] {
                k += 1;
                v[k] = q;
                z[k] = s;
                z[k + 1] = f64::INFINITY;
                break;
            }
            if k == 0 {
                v[0] = q;
                z[0] = f64::NEG_INFINITY;
                z[1] = f64::INFINITY;
                break;
            }
            k -= 1;
        }
    }

    k = 0;
    for (q, slot) in out.iter_mut().enumerate() {
        while z[k + 1] < q as f64 {
            k += 1;
        }
        let diff = q as f64 - v[k] as f64;
        *slot = diff * diff + f[v[k]];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mask_is_an_error() {
        let mask = BinaryMask::new_background(4, 4);
        assert_eq!(distance_field(&mask).unwrap_err(), Error::EmptyReferenceMask);
    }

    #[test]
    fn foreground_pixels_have_distance_zero() {
        let mut mask = BinaryMask::new_background(5, 5);
        mask.set(2, 2, true);
        mask.set(4, 0, true);

        let field = distance_field(&mask).unwrap();
        assert_eq!(field.get(2, 2), 0.0);
        assert_eq!(field.get(4, 0), 0.0);
    }

    #[test]
    fn all_foreground_mask_is_zero_everywhere() {
        let mask = BinaryMask {
            width: 3,
            height: 3,
            data: vec![true; 9],
        };
        let field = distance_field(&mask).unwrap();
        assert!(field.data.iter().all(|&d| d == 0.0));
    }

    #[test]
    fn distances_from_single_point_are_euclidean() {
        let mut mask = BinaryMask::new_background(7, 7);
        mask.set(3, 3, true);

        let field = distance_field(&mask).unwrap();
        assert_eq!(field.get(4, 3), 1.0);
        assert_eq!(field.get(3, 0), 3.0);
        assert!((field.get(4, 4) - 2.0f64.sqrt()).abs() < 1e-12);
        assert!((field.get(0, 0) - 18.0f64.sqrt()).abs() < 1e-12);
        assert!((field.get(6, 1) - 13.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn field_is_non_negative_and_grows_away_from_source() {
        let mut mask = BinaryMask::new_background(9, 1);
        mask.set(0, 0, true);

        let field = distance_field(&mask).unwrap();
        for x in 0..9 {
            assert_eq!(field.get(x, 0), x as f64);
        }
    }

    #[test]
    fn nearest_of_two_sources_wins() {
        let mut mask = BinaryMask::new_background(10, 1);
        mask.set(0, 0, true);
        mask.set(9, 0, true);

        let field = distance_field(&mask).unwrap();
        assert_eq!(field.get(3, 0), 3.0);
        assert_eq!(field.get(7, 0), 2.0);
    }
}
