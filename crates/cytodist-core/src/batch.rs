//! Batch aggregation over a set of image files.
//!
//! Images are decoded and analyzed in parallel; results are reported in
//! input order regardless of completion order, so a batch over an unchanged
//! file list is reproducible.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::analysis::analyze_image;
use crate::config::AnalysisConfig;
use crate::decoders::decode_image;
use crate::error::Error;
use crate::models::{AnalysisKind, BatchOutcome, FailurePolicy, ImageFailure, ImageResult};
use crate::verbose_println;

/// Run one analysis kind over every file in the batch.
///
/// Under [`FailurePolicy::Abort`] the first per-image error (in input order)
/// fails the whole run. Under [`FailurePolicy::Continue`] failed images are
/// recorded in the outcome and the rest of the batch still completes. An
/// empty batch is valid and produces an empty outcome.
pub fn run_batch(
    paths: &[PathBuf],
    kind: AnalysisKind,
    config: &AnalysisConfig,
) -> Result<BatchOutcome, Error> {
    let total = paths.len();
    let completed = AtomicUsize::new(0);

    let per_image: Vec<Result<ImageResult, ImageFailure>> = paths
        .par_iter()
        .map(|path| {
            let outcome = process_one(path, kind, config);
            let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
            match &outcome {
                Ok(_) => verbose_println!("[{}/{}] analyzed {}", done, total, path.display()),
                Err(failure) => verbose_println!(
                    "[{}/{}] failed {}: {}",
                    done,
                    total,
                    path.display(),
                    failure.error
                ),
            }
            outcome
        })
        .collect();

    let mut results = Vec::new();
    let mut failures = Vec::new();
    for outcome in per_image {
        match outcome {
            Ok(result) => results.push(result),
            Err(failure) => match config.failure_policy {
                FailurePolicy::Abort => {
                    return Err(Error::Image {
                        path: failure.path,
                        message: failure.error,
                    })
                }
                FailurePolicy::Continue => failures.push(failure),
            },
        }
    }

    Ok(BatchOutcome { results, failures })
}

fn process_one(
    path: &Path,
    kind: AnalysisKind,
    config: &AnalysisConfig,
) -> Result<ImageResult, ImageFailure> {
    let file_name = display_name(path);
    decode_image(path)
        .and_then(|image| analyze_image(&image, &file_name, kind, config))
        .map_err(|err| ImageFailure {
            path: path.to_path_buf(),
            error: err.to_string(),
        })
}

/// The image's identity in reports: its file name, falling back to the full
/// path for inputs like `..`.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoders::tests::write_test_tiff;

    /// 8x8 RGB8 image with a red block at (1,1)..(3,3) and a blue block at
    /// (5,5)..(7,7) on a black background.
    fn sample_image_bytes() -> Vec<u8> {
        let mut data = vec![0u8; 8 * 8 * 3];
        for y in 1..3u32 {
            for x in 1..3u32 {
                data[((y * 8 + x) * 3) as usize] = 230;
            }
        }
        for y in 5..7u32 {
            for x in 5..7u32 {
                data[((y * 8 + x) * 3 + 2) as usize] = 230;
            }
        }
        data
    }

    fn test_config() -> AnalysisConfig {
        AnalysisConfig {
            pixel_to_micron: 1.0,
            min_object_size: 0,
            ..AnalysisConfig::default()
        }
    }

    #[test]
    fn empty_batch_is_valid() {
        let outcome = run_batch(&[], AnalysisKind::DropletArea, &test_config()).unwrap();
        assert!(outcome.results.is_empty());
        assert!(outcome.failures.is_empty());
    }

    #[test]
    fn batch_results_follow_input_order() {
        let bytes = sample_image_bytes();
        let a = write_test_tiff("batch_a.tif", 8, 8, &bytes);
        let b = write_test_tiff("batch_b.tif", 8, 8, &bytes);
        let c = write_test_tiff("batch_c.tif", 8, 8, &bytes);

        let paths = vec![c, a, b];
        let outcome = run_batch(&paths, AnalysisKind::NucleusDistance, &test_config()).unwrap();

        let names: Vec<&str> = outcome
            .results
            .iter()
            .map(|r| r.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["batch_c.tif", "batch_a.tif", "batch_b.tif"]);
        assert!(outcome.failures.is_empty());

        for result in &outcome.results {
            assert_eq!(result.series.len(), 1);
            assert_eq!(result.series[0].summary.count, 1);
        }
    }

    #[test]
    fn abort_policy_fails_on_first_bad_image() {
        let good = write_test_tiff("batch_good.tif", 8, 8, &sample_image_bytes());
        let dir = good.parent().unwrap().to_path_buf();
        let bad = dir.join("batch_bad.tif");
        std::fs::write(&bad, b"not a TIFF").unwrap();

        let err = run_batch(
            &[good, bad],
            AnalysisKind::DropletArea,
            &test_config(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Image { .. }));
        assert!(err.to_string().contains("batch_bad.tif"));
    }

    #[test]
    fn continue_policy_records_failures_and_keeps_going() {
        let good = write_test_tiff("batch_keep.tif", 8, 8, &sample_image_bytes());
        let dir = good.parent().unwrap().to_path_buf();
        let bad = dir.join("batch_broken.tif");
        std::fs::write(&bad, b"not a TIFF").unwrap();

        let config = AnalysisConfig {
            failure_policy: FailurePolicy::Continue,
            ..test_config()
        };
        let outcome = run_batch(
            &[bad.clone(), good],
            AnalysisKind::DropletArea,
            &config,
        )
        .unwrap();

        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].file_name, "batch_keep.tif");
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].path, bad);
    }
}
