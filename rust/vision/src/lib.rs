// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structural analysis of architectural photographs
//!
//! This crate provides the image pipeline behind the photo-to-3D-model
//! workflow:
//! 1. Loading photographs with format validation
//! 2. Normalizing onto a fixed square canvas (centered, padded, never cropped)
//! 3. Enhancement (contrast, sharpness, median denoise)
//! 4. Edge extraction (Canny with hysteresis thresholds)
//! 5. Line detection (probabilistic Hough transform)
//! 6. Perspective estimation from line orientations
//!
//! # Usage
//!
//! ```rust,ignore
//! use archiform_vision::{analyze_perspective, process_image, AnalysisConfig, OutputSink};
//!
//! let config = AnalysisConfig::default();
//!
//! // Does the photo show vanishing-point perspective?
//! let analysis = analyze_perspective("facade.jpg".as_ref(), &config)?;
//! println!("{} diagonal lines", analysis.diagonal_lines);
//!
//! // Normalize + enhance, then persist
//! let processed = process_image("facade.jpg".as_ref(), &config)?;
//! let sink = OutputSink::new("data/training_data");
//! sink.save(&processed, "facade", "processed")?;
//! ```

pub mod batch;
pub mod error;
pub mod image_ops;
pub mod line_ops;
pub mod loader;
pub mod normalize;
pub mod perspective;
pub mod storage;
pub mod types;

// Re-export commonly used types and functions
pub use batch::{process_directory, BatchReport, FileOutcome};
pub use error::{Error, Result};
pub use image_ops::{enhance, extract_edges, to_grayscale};
pub use line_ops::detect_lines;
pub use loader::{is_supported, load_image, SUPPORTED_EXTENSIONS};
pub use normalize::{resize_to_canvas, thumbnail};
pub use perspective::classify;
pub use storage::OutputSink;
pub use types::{
    AnalysisConfig, LineSegment, Orientation, PerspectiveAnalysis, Point2D,
};

use image::{GrayImage, RgbImage};
use std::path::Path;

/// Load a photo, normalize it onto the configured canvas, and enhance it
///
/// This is the per-file sequence the batch orchestrator runs; errors
/// propagate to the caller (no silent recovery for single-image work).
pub fn process_image(path: &Path, config: &AnalysisConfig) -> Result<RgbImage> {
    let image = loader::load_image(path)?;
    let canvas = normalize::resize_to_canvas(&image, config.target_size, config.background);
    Ok(image_ops::enhance(&canvas, config))
}

/// Extract the binary edge map of a photo at its natural resolution
pub fn extract_edges_from_path(path: &Path, config: &AnalysisConfig) -> Result<GrayImage> {
    let image = loader::load_image(path)?;
    Ok(image_ops::extract_edges(&image.to_rgb8(), config))
}

/// Detect straight-line segments in a photo
pub fn detect_lines_in_path(path: &Path, config: &AnalysisConfig) -> Result<Vec<LineSegment>> {
    let edges = extract_edges_from_path(path, config)?;
    Ok(line_ops::detect_lines(&edges, config))
}

/// Full structural analysis: edges, lines, orientation buckets, perspective
pub fn analyze_perspective(path: &Path, config: &AnalysisConfig) -> Result<PerspectiveAnalysis> {
    let segments = detect_lines_in_path(path, config)?;
    Ok(perspective::classify(&segments, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb};

    fn fill_rect(img: &mut RgbImage, x1: u32, y1: u32, x2: u32, y2: u32, color: Rgb<u8>) {
        for y in y1..y2.min(img.height()) {
            for x in x1..x2.min(img.width()) {
                img.put_pixel(x, y, color);
            }
        }
    }

    fn outline_rect(img: &mut RgbImage, x1: u32, y1: u32, x2: u32, y2: u32, t: u32, color: Rgb<u8>) {
        fill_rect(img, x1, y1, x2, y1 + t, color);
        fill_rect(img, x1, y2 - t, x2, y2, color);
        fill_rect(img, x1, y1, x1 + t, y2, color);
        fill_rect(img, x2 - t, y1, x2, y2, color);
    }

    /// 800x600 synthetic facade: sky background, filled building rectangle
    /// with a black outline, and a 4x3 grid of windows
    fn synthetic_building_photo() -> RgbImage {
        let mut img = RgbImage::from_pixel(800, 600, Rgb([100, 150, 200]));

        fill_rect(&mut img, 200, 200, 600, 500, Rgb([150, 150, 150]));
        outline_rect(&mut img, 200, 200, 600, 500, 4, Rgb([0, 0, 0]));

        for row in 0..3 {
            for col in 0..4 {
                let x = 250 + col * 80;
                let y = 250 + row * 80;
                fill_rect(&mut img, x, y, x + 40, y + 40, Rgb([200, 200, 255]));
                outline_rect(&mut img, x, y, x + 40, y + 40, 2, Rgb([0, 0, 0]));
            }
        }

        img
    }

    #[test]
    fn test_end_to_end_synthetic_building() {
        let config = AnalysisConfig::default();
        let photo = DynamicImage::ImageRgb8(synthetic_building_photo());

        let canvas = resize_to_canvas(&photo, config.target_size, config.background);
        assert_eq!(canvas.dimensions(), (512, 512));

        let edges = extract_edges(&canvas, &config);
        assert_eq!(edges.dimensions(), (512, 512));

        let lines = detect_lines(&edges, &config);
        let analysis = classify(&lines, &config);

        // The facade outline is axis-aligned: both orientations present,
        // nothing intentionally diagonal
        assert!(analysis.total_lines > 0);
        assert!(analysis.horizontal_lines > 0);
        assert!(analysis.vertical_lines > 0);
        assert!(!analysis.has_perspective);
        assert_eq!(
            analysis.horizontal_lines + analysis.vertical_lines + analysis.diagonal_lines,
            analysis.total_lines
        );
    }

    #[test]
    fn test_analyze_perspective_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("building.png");
        synthetic_building_photo().save(&path).unwrap();

        let analysis = analyze_perspective(&path, &AnalysisConfig::default()).unwrap();
        assert!(analysis.total_lines > 0);
        assert!(analysis.horizontal_lines > 0);
        assert!(analysis.vertical_lines > 0);
        assert!(!analysis.has_perspective);
    }

    #[test]
    fn test_blank_photo_yields_zero_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.png");
        RgbImage::from_pixel(512, 512, Rgb([180, 180, 180]))
            .save(&path)
            .unwrap();

        let analysis = analyze_perspective(&path, &AnalysisConfig::default()).unwrap();
        assert_eq!(analysis.total_lines, 0);
        assert!(!analysis.has_perspective);
    }

    #[test]
    fn test_single_image_errors_propagate() {
        let config = AnalysisConfig::default();
        let missing = Path::new("/nonexistent/building.png");

        assert!(matches!(
            process_image(missing, &config),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            analyze_perspective(missing, &config),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_process_image_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("building.png");
        synthetic_building_photo().save(&path).unwrap();

        let config = AnalysisConfig::default();
        let first = process_image(&path, &config).unwrap();
        let second = process_image(&path, &config).unwrap();
        assert_eq!(first.as_raw(), second.as_raw());
    }
}
