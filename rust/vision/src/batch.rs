// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batch orchestration over a directory of photographs
//!
//! Each file runs the load -> canvas -> enhance -> persist sequence
//! independently; one corrupt file never aborts the batch. Outcomes are
//! recorded per file so callers can report "N of M processed" without
//! parsing logs.

use crate::error::{Error, Result};
use crate::storage::{OutputSink, DEFAULT_SUBFOLDER};
use crate::types::AnalysisConfig;
use crate::{image_ops, loader, normalize};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Result of processing a single file in a batch
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub result: Result<PathBuf>,
}

/// Aggregate result of a directory batch
///
/// Holds one outcome per supported file attempted, in directory-listing
/// order. Files with unsupported extensions are skipped before any attempt
/// and do not appear here.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    /// Output paths of every file that succeeded, in attempt order
    pub fn output_paths(&self) -> Vec<PathBuf> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().cloned())
            .collect()
    }

    /// Number of files processed successfully
    pub fn processed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Number of files that failed
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.processed()
    }

    /// Number of files attempted
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }
}

/// Normalize and enhance every supported image in a directory
///
/// Fails with `InvalidPath` when `dir` is not a directory. Per-file
/// failures (corrupt data, I/O) are logged, recorded in the report, and
/// skipped; the files fan out over the rayon thread pool since each one
/// touches only its own input and output paths.
pub fn process_directory(
    dir: &Path,
    sink: &OutputSink,
    config: &AnalysisConfig,
) -> Result<BatchReport> {
    if !dir.is_dir() {
        return Err(Error::InvalidPath(dir.to_path_buf()));
    }

    let mut inputs: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if loader::is_supported(&path) {
            inputs.push(path);
        } else {
            debug!(path = %path.display(), "skipping unsupported file");
        }
    }

    let outcomes: Vec<FileOutcome> = inputs
        .into_par_iter()
        .map(|input| {
            let result = process_one(&input, sink, config);
            if let Err(error) = &result {
                warn!(path = %input.display(), %error, "failed to process file");
            }
            FileOutcome { input, result }
        })
        .collect();

    let report = BatchReport { outcomes };
    info!(
        processed = report.processed(),
        total = report.total(),
        "batch complete"
    );
    Ok(report)
}

fn process_one(input: &Path, sink: &OutputSink, config: &AnalysisConfig) -> Result<PathBuf> {
    let image = loader::load_image(input)?;
    let canvas = normalize::resize_to_canvas(&image, config.target_size, config.background);
    let enhanced = image_ops::enhance(&canvas, config);

    let name = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    sink.save(&enhanced, &name, DEFAULT_SUBFOLDER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_valid_png(dir: &Path, name: &str) {
        let img = RgbImage::from_pixel(20, 15, Rgb([90, 120, 150]));
        img.save(dir.join(name)).unwrap();
    }

    #[test]
    fn test_rejects_non_directory() {
        let result = process_directory(
            Path::new("/nonexistent/folder"),
            &OutputSink::new("/tmp"),
            &AnalysisConfig::default(),
        );
        assert!(matches!(result, Err(Error::InvalidPath(_))));
    }

    #[test]
    fn test_empty_directory_yields_empty_report() {
        let input_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();

        let report = process_directory(
            input_dir.path(),
            &OutputSink::new(output_dir.path()),
            &AnalysisConfig::default(),
        )
        .unwrap();

        assert_eq!(report.total(), 0);
        assert!(report.output_paths().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_isolated() {
        let input_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();

        for i in 0..5 {
            write_valid_png(input_dir.path(), &format!("photo_{i}.png"));
        }
        std::fs::write(input_dir.path().join("broken.jpg"), b"not a jpeg at all").unwrap();

        let report = process_directory(
            input_dir.path(),
            &OutputSink::new(output_dir.path()),
            &AnalysisConfig::default(),
        )
        .unwrap();

        assert_eq!(report.total(), 6);
        assert_eq!(report.processed(), 5);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.output_paths().len(), 5);

        let broken = report
            .outcomes
            .iter()
            .find(|o| o.input.file_name().unwrap() == "broken.jpg")
            .unwrap();
        assert!(matches!(broken.result, Err(Error::Decode { .. })));

        for path in report.output_paths() {
            assert!(path.exists());
        }
    }

    #[test]
    fn test_unsupported_extension_is_skipped_silently() {
        let input_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();

        write_valid_png(input_dir.path(), "facade.png");
        std::fs::write(input_dir.path().join("notes.txt"), "not an image").unwrap();

        let report = process_directory(
            input_dir.path(),
            &OutputSink::new(output_dir.path()),
            &AnalysisConfig::default(),
        )
        .unwrap();

        // The .txt file is never attempted: no error, no outcome entry
        assert_eq!(report.total(), 1);
        assert_eq!(report.processed(), 1);
    }

    #[test]
    fn test_outputs_are_canvas_sized_pngs() {
        let input_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();
        write_valid_png(input_dir.path(), "facade.png");

        let config = AnalysisConfig::default();
        let report = process_directory(
            input_dir.path(),
            &OutputSink::new(output_dir.path()),
            &config,
        )
        .unwrap();

        let path = &report.output_paths()[0];
        assert!(path.ends_with("processed/facade.png"));

        let saved = image::open(path).unwrap();
        assert_eq!(saved.width(), config.target_size);
        assert_eq!(saved.height(), config.target_size);
    }
}
