// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for architectural photo structural analysis

use serde::{Deserialize, Serialize};

/// A 2D point in pixel space
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A straight-line segment detected in an edge map
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LineSegment {
    pub start: Point2D,
    pub end: Point2D,
}

impl LineSegment {
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Orientation angle in degrees, normalized to `[0, 180)`
    ///
    /// A segment and its reverse have the same orientation, so a
    /// leftward horizontal segment (|atan2| == 180°) maps to 0°.
    pub fn angle_degrees(&self) -> f64 {
        let mut angle = (self.end.y - self.start.y)
            .atan2(self.end.x - self.start.x)
            .to_degrees()
            .abs();
        if angle >= 180.0 {
            angle -= 180.0;
        }
        angle
    }
}

/// Orientation bucket for a detected segment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
    Diagonal,
}

/// Summary of the line-orientation analysis of a photograph
///
/// The three sub-counts always sum to `total_lines`: every segment is
/// classified into exactly one bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PerspectiveAnalysis {
    pub total_lines: usize,
    pub horizontal_lines: usize,
    pub vertical_lines: usize,
    pub diagonal_lines: usize,
    /// Heuristic: a building photo with many non-axis-aligned structural
    /// lines likely shows vanishing-point convergence.
    pub has_perspective: bool,
}

/// Configuration for the analysis pipeline
///
/// Every threshold the pipeline uses lives here; the processing functions
/// never read ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Target canvas edge length in pixels (output is square)
    pub target_size: u32,
    /// Canvas padding color (RGB)
    pub background: [u8; 3],
    /// Contrast boost multiplier applied during enhancement
    pub contrast_factor: f32,
    /// Sharpness boost multiplier applied during enhancement
    pub sharpness_factor: f32,
    /// Radius of the median denoising filter (1 = 3x3 neighborhood)
    pub median_radius: u32,
    /// Canny hysteresis low threshold (edge linking)
    pub canny_low: f32,
    /// Canny hysteresis high threshold (strong-edge seeding)
    pub canny_high: f32,
    /// Hough angular resolution in degrees
    pub angular_resolution_deg: f64,
    /// Hough accumulator vote threshold to confirm a line
    pub hough_threshold: u32,
    /// Minimum segment length in pixels
    pub min_line_length: f64,
    /// Maximum gap between collinear fragments merged into one segment
    pub max_line_gap: f64,
    /// Segments at or below this angle (or its 180° wrap) are horizontal
    pub horizontal_max_angle: f64,
    /// Open interval of angles classified as vertical
    pub vertical_band: (f64, f64),
    /// More diagonal segments than this flags the photo as perspective
    pub min_diagonals_for_perspective: usize,
    /// Longer edge bound for generated thumbnails
    pub thumbnail_size: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            target_size: 512,
            background: [255, 255, 255],
            contrast_factor: 1.2,
            sharpness_factor: 1.1,
            median_radius: 1,
            canny_low: 50.0,
            canny_high: 150.0,
            angular_resolution_deg: 1.0,
            hough_threshold: 100,
            min_line_length: 100.0,
            max_line_gap: 10.0,
            horizontal_max_angle: 10.0,
            vertical_band: (80.0, 100.0),
            min_diagonals_for_perspective: 5,
            thumbnail_size: 128,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_segment_length() {
        let seg = LineSegment::new(Point2D::new(0.0, 0.0), Point2D::new(3.0, 4.0));
        assert_relative_eq!(seg.length(), 5.0);
    }

    #[test]
    fn test_angle_normalization() {
        // Rightward horizontal
        let right = LineSegment::new(Point2D::new(0.0, 0.0), Point2D::new(10.0, 0.0));
        assert_relative_eq!(right.angle_degrees(), 0.0);

        // Leftward horizontal wraps from 180° to 0°
        let left = LineSegment::new(Point2D::new(10.0, 0.0), Point2D::new(0.0, 0.0));
        assert_relative_eq!(left.angle_degrees(), 0.0);

        // Vertical
        let up = LineSegment::new(Point2D::new(0.0, 0.0), Point2D::new(0.0, 10.0));
        assert_relative_eq!(up.angle_degrees(), 90.0, epsilon = 1e-9);

        // 45° diagonal
        let diag = LineSegment::new(Point2D::new(0.0, 0.0), Point2D::new(10.0, 10.0));
        assert_relative_eq!(diag.angle_degrees(), 45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_default_config_literals() {
        let config = AnalysisConfig::default();
        assert_eq!(config.target_size, 512);
        assert_eq!(config.hough_threshold, 100);
        assert_relative_eq!(config.canny_low, 50.0);
        assert_relative_eq!(config.canny_high, 150.0);
    }
}
