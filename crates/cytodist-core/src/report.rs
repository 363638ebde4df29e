//! Tabular report writing.
//!
//! A batch produces a `summary.csv` with one row per image, one detail CSV
//! per image with one row per measured object, and a `failures.csv` when a
//! run under the continue policy recorded failures.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::models::{BatchOutcome, ImageResult};

/// Detail file stems are capped so report names stay short enough for
/// spreadsheet sheet names.
const MAX_STEM_LEN: usize = 31;

/// Write all reports for one batch outcome into `out_dir` (created if
/// missing). Existing files with the same names are overwritten.
pub fn write_reports(out_dir: &Path, outcome: &BatchOutcome) -> Result<(), Error> {
    fs::create_dir_all(out_dir)
        .map_err(|e| Error::ReportWrite(format!("{}: {}", out_dir.display(), e)))?;

    write_summary(&out_dir.join("summary.csv"), &outcome.results)?;

    let mut used_stems = HashSet::new();
    for result in &outcome.results {
        let stem = unique_stem(&result.file_name, &mut used_stems);
        write_detail(&out_dir.join(format!("{}.csv", stem)), result)?;
    }

    if !outcome.failures.is_empty() {
        write_failures(&out_dir.join("failures.csv"), outcome)?;
    }

    Ok(())
}

/// One row per image; per-series count, total, mean, and min columns.
/// Undefined statistics render as `n/a`. An empty batch still produces the
/// file with a header row.
fn write_summary(path: &Path, results: &[ImageResult]) -> Result<(), Error> {
    let mut lines = Vec::new();

    let mut header = vec!["file".to_string()];
    if let Some(first) = results.first() {
        for series in &first.series {
            header.push(format!("{}_count", series.label));
            header.push(format!("{}_total", series.label));
            header.push(format!("{}_mean", series.label));
            header.push(format!("{}_min", series.label));
        }
    }
    lines.push(header.join(","));

    for result in results {
        let mut row = vec![csv_field(&result.file_name)];
        for series in &result.series {
            row.push(series.summary.count.to_string());
            row.push(series.summary.total.to_string());
            row.push(series.summary.mean.to_string());
            row.push(series.summary.min.to_string());
        }
        lines.push(row.join(","));
    }

    write_lines(path, &lines)
}

/// One row per object ordinal; series shorter than the longest one leave
/// their cell blank past their last object.
fn write_detail(path: &Path, result: &ImageResult) -> Result<(), Error> {
    let mut lines = Vec::new();

    let mut header = vec!["object".to_string()];
    for series in &result.series {
        header.push(series.label.clone());
    }
    lines.push(header.join(","));

    let rows = result
        .series
        .iter()
        .map(|s| s.values.len())
        .max()
        .unwrap_or(0);
    for i in 0..rows {
        let mut row = vec![(i + 1).to_string()];
        for series in &result.series {
            match series.values.get(i) {
                Some(value) => row.push(value.to_string()),
                None => row.push(String::new()),
            }
        }
        lines.push(row.join(","));
    }

    write_lines(path, &lines)
}

fn write_failures(path: &Path, outcome: &BatchOutcome) -> Result<(), Error> {
    let mut lines = vec!["file,error".to_string()];
    for failure in &outcome.failures {
        lines.push(format!(
            "{},{}",
            csv_field(&failure.path.display().to_string()),
            csv_field(&failure.error)
        ));
    }
    write_lines(path, &lines)
}

fn write_lines(path: &Path, lines: &[String]) -> Result<(), Error> {
    let mut contents = lines.join("\n");
    contents.push('\n');
    fs::write(path, contents).map_err(|e| Error::ReportWrite(format!("{}: {}", path.display(), e)))
}

/// Quote a CSV field when it contains a delimiter, quote, or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Detail file stem for one image: the file name without extension,
/// restricted to a portable character set, truncated, and deduplicated
/// against stems already taken in this run.
fn unique_stem(file_name: &str, used: &mut HashSet<String>) -> String {
    let stem = PathBuf::from(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());

    let mut base: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if base.is_empty() {
        base.push_str("image");
    }
    base.truncate(MAX_STEM_LEN);

    let mut candidate = base.clone();
    let mut suffix = 2;
    while used.contains(&candidate) {
        let tag = format!("_{}", suffix);
        let keep = MAX_STEM_LEN.saturating_sub(tag.len());
        candidate = format!("{}{}", &base[..keep.min(base.len())], tag);
        suffix += 1;
    }

    used.insert(candidate.clone());
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ImageFailure, MeasurementSeries};

    fn temp_report_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("cytodist-report-{}", std::process::id()))
            .join(name);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn result(file_name: &str, series: Vec<MeasurementSeries>) -> ImageResult {
        ImageResult {
            file_name: file_name.to_string(),
            series,
        }
    }

    #[test]
    fn summary_has_one_row_per_image() {
        let dir = temp_report_dir("summary");
        let outcome = BatchOutcome {
            results: vec![
                result(
                    "a.tif",
                    vec![MeasurementSeries::new("lipid_area_um2", vec![2.0, 4.0])],
                ),
                result(
                    "b.tif",
                    vec![MeasurementSeries::new("lipid_area_um2", vec![])],
                ),
            ],
            failures: vec![],
        };

        write_reports(&dir, &outcome).unwrap();

        let summary = fs::read_to_string(dir.join("summary.csv")).unwrap();
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(
            lines[0],
            "file,lipid_area_um2_count,lipid_area_um2_total,lipid_area_um2_mean,lipid_area_um2_min"
        );
        assert_eq!(lines[1], "a.tif,2,6,3,2");
        // Empty series: total stays 0, mean and min are undefined
        assert_eq!(lines[2], "b.tif,0,0,n/a,n/a");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn detail_files_pad_shorter_series_with_blanks() {
        let dir = temp_report_dir("detail");
        let outcome = BatchOutcome {
            results: vec![result(
                "cells.tif",
                vec![
                    MeasurementSeries::new("lipid_to_microtubule_um", vec![1.5, 2.5, 3.5]),
                    MeasurementSeries::new("mitochondria_to_microtubule_um", vec![0.5]),
                ],
            )],
            failures: vec![],
        };

        write_reports(&dir, &outcome).unwrap();

        let detail = fs::read_to_string(dir.join("cells.csv")).unwrap();
        let lines: Vec<&str> = detail.lines().collect();
        assert_eq!(
            lines[0],
            "object,lipid_to_microtubule_um,mitochondria_to_microtubule_um"
        );
        assert_eq!(lines[1], "1,1.5,0.5");
        assert_eq!(lines[2], "2,2.5,");
        assert_eq!(lines[3], "3,3.5,");
    }

    #[test]
    fn empty_batch_writes_header_only_summary() {
        let dir = temp_report_dir("empty");
        let outcome = BatchOutcome {
            results: vec![],
            failures: vec![],
        };

        write_reports(&dir, &outcome).unwrap();

        let summary = fs::read_to_string(dir.join("summary.csv")).unwrap();
        assert_eq!(summary, "file\n");
        assert!(!dir.join("failures.csv").exists());
    }

    #[test]
    fn failures_file_written_only_when_failures_exist() {
        let dir = temp_report_dir("failures");
        let outcome = BatchOutcome {
            results: vec![],
            failures: vec![ImageFailure {
                path: PathBuf::from("/data/broken.tif"),
                error: "failed to decode image: bad header".to_string(),
            }],
        };

        write_reports(&dir, &outcome).unwrap();

        let failures = fs::read_to_string(dir.join("failures.csv")).unwrap();
        let lines: Vec<&str> = failures.lines().collect();
        assert_eq!(lines[0], "file,error");
        assert!(lines[1].starts_with("/data/broken.tif,"));
    }

    #[test]
    fn stems_are_sanitized_truncated_and_deduplicated() {
        let mut used = HashSet::new();

        assert_eq!(unique_stem("well A1 (rep#2).tif", &mut used), "well_A1__rep_2_");

        let long = "a_very_long_microscope_export_name_2026-08-29.tif";
        let first = unique_stem(long, &mut used);
        assert_eq!(first.len(), MAX_STEM_LEN);
        let second = unique_stem(long, &mut used);
        assert_ne!(first, second);
        assert!(second.len() <= MAX_STEM_LEN);
        assert!(second.ends_with("_2"));
    }

    #[test]
    fn csv_fields_with_delimiters_are_quoted() {
        assert_eq!(csv_field("plain.tif"), "plain.tif");
        assert_eq!(csv_field("a,b.tif"), "\"a,b.tif\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
