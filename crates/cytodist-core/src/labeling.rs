//! Connected-component labeling and per-component property extraction.
//!
//! Two-pass labeling with union-find: the first raster scan assigns
//! provisional labels and records equivalences, the second relabels into
//! consecutive final labels and collects coordinates, area, and centroid per
//! component.

use crate::models::Connectivity;
use crate::segmentation::BinaryMask;

/// One maximal connected foreground region of a binary mask.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledComponent {
    /// Positive label, contiguous from 1 within one labeling call.
    pub label: u32,
    /// Every pixel of the component, in raster order. Never empty.
    pub coords: Vec<(u32, u32)>,
    /// Pixel count; equals `coords.len()`.
    pub area: usize,
    /// Mean pixel position (x, y).
    pub centroid: (f64, f64),
}

/// Find the root label in the union-find parent table, with path compression.
fn find_root(parents: &mut [usize], label: usize) -> usize {
    let mut current = label;
    while current != parents[current] {
        parents[current] = parents[parents[current]];
        current = parents[current];
    }
    current
}

/// Union two labels; the smaller root becomes the canonical parent.
fn union_labels(parents: &mut [usize], a: usize, b: usize) {
    let root_a = find_root(parents, a);
    let root_b = find_root(parents, b);
    if root_a != root_b {
        if root_a < root_b {
            parents[root_b] = root_a;
        } else {
            parents[root_a] = root_b;
        }
    }
}

/// Label every connected foreground region of the mask.
///
/// Labels are assigned in first-encounter raster order, contiguous from 1,
/// so repeated calls on the same mask are bit-identical. An all-background
/// mask yields an empty list.
pub fn label_components(mask: &BinaryMask, connectivity: Connectivity) -> Vec<LabeledComponent> {
    let width = mask.width as usize;
    let height = mask.height as usize;

    let mut labels = vec![0usize; width * height];
    let mut parents = vec![0usize]; // label 0 is background
    let mut label_count = 0usize;

    // First pass: provisional labels from already-visited neighbors
    for y in 0..height {
        for x in 0..width {
            if !mask.data[y * width + x] {
                continue;
            }

            let mut neighbor_labels: Vec<usize> = Vec::with_capacity(4);
            let push_neighbor = |nx: isize, ny: isize, labels: &[usize]| -> Option<usize> {
                if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                    return None;
                }
                let label = labels[ny as usize * width + nx as usize];
                (label > 0).then_some(label)
            };

            let x = x as isize;
            let y = y as isize;
            if let Some(l) = push_neighbor(x, y - 1, &labels) {
                neighbor_labels.push(l);
            }
            if let Some(l) = push_neighbor(x - 1, y, &labels) {
                neighbor_labels.push(l);
            }
            if connectivity == Connectivity::Eight {
                if let Some(l) = push_neighbor(x - 1, y - 1, &labels) {
                    neighbor_labels.push(l);
                }
                if let Some(l) = push_neighbor(x + 1, y - 1, &labels) {
                    neighbor_labels.push(l);
                }
            }
            let (x, y) = (x as usize, y as usize);

            match neighbor_labels.iter().min().copied() {
                None => {
                    label_count += 1;
                    labels[y * width + x] = label_count;
                    parents.push(label_count);
                }
                Some(min_label) => {
                    labels[y * width + x] = min_label;
                    for &neighbor in &neighbor_labels {
                        if neighbor != min_label {
                            union_labels(&mut parents, min_label, neighbor);
                        }
                    }
                }
            }
        }
    }

    // Resolve equivalences and map roots to consecutive final labels
    for i in 1..parents.len() {
        find_root(&mut parents, i);
    }

    let mut relabel = vec![0usize; parents.len()];
    let mut next_label = 0usize;
    for i in 1..parents.len() {
        let root = parents[i];
        if relabel[root] == 0 {
            next_label += 1;
            relabel[root] = next_label;
        }
        relabel[i] = relabel[root];
    }

    // Second pass: collect coordinates per final label
    let mut coords: Vec<Vec<(u32, u32)>> = vec![Vec::new(); next_label];
    for y in 0..height {
        for x in 0..width {
            let label = labels[y * width + x];
            if label > 0 {
                coords[relabel[label] - 1].push((x as u32, y as u32));
            }
        }
    }

    coords
        .into_iter()
        .enumerate()
        .map(|(i, coords)| {
            let area = coords.len();
            let (sum_x, sum_y) = coords
                .iter()
                .fold((0.0f64, 0.0f64), |(sx, sy), &(x, y)| {
                    (sx + x as f64, sy + y as f64)
                });
            LabeledComponent {
                label: (i + 1) as u32,
                area,
                centroid: (sum_x / area as f64, sum_y / area as f64),
                coords,
            }
        })
        .collect()
}
