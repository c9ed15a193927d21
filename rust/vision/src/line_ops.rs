// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Straight-line segment detection over a binary edge map

use crate::types::{AnalysisConfig, LineSegment, Point2D};
use image::GrayImage;
use std::f64::consts::PI;

/// Perpendicular distance band around a Hough peak, in pixels
const RHO_BAND: f64 = 2.0;

/// Upper bound on accumulator peaks examined per image
const MAX_PEAKS: usize = 500;

/// Detect line segments with a probabilistic Hough-style transform
///
/// Edge pixels vote in (theta, rho) space at the configured angular
/// resolution; accumulator cells reaching `hough_threshold` votes are
/// traced back to the edge pixels that produced them, which are ordered
/// along the line and split wherever consecutive pixels are farther apart
/// than `max_line_gap`. Runs shorter than `min_line_length` are dropped.
///
/// An empty result is valid (blank or textureless edge maps). The output
/// is deterministic for a fixed edge map and configuration.
pub fn detect_lines(edges: &GrayImage, config: &AnalysisConfig) -> Vec<LineSegment> {
    let edge_points = collect_edge_points(edges);
    if edge_points.is_empty() {
        return Vec::new();
    }

    let theta_resolution = config.angular_resolution_deg.to_radians();
    let num_thetas = (PI / theta_resolution).round() as usize;

    let mut cos_table = Vec::with_capacity(num_thetas);
    let mut sin_table = Vec::with_capacity(num_thetas);
    for i in 0..num_thetas {
        let theta = i as f64 * theta_resolution;
        cos_table.push(theta.cos());
        sin_table.push(theta.sin());
    }

    let width = edges.width() as f64;
    let height = edges.height() as f64;
    let rho_offset = (width * width + height * height).sqrt();
    let num_rhos = (2.0 * rho_offset) as usize + 1;

    // Vote in Hough space
    let mut accumulator = vec![0u32; num_thetas * num_rhos];
    for &(x, y) in &edge_points {
        for theta_idx in 0..num_thetas {
            let rho = x as f64 * cos_table[theta_idx] + y as f64 * sin_table[theta_idx];
            let rho_idx = (rho + rho_offset) as usize;
            if rho_idx < num_rhos {
                accumulator[theta_idx * num_rhos + rho_idx] += 1;
            }
        }
    }

    // Cells with enough votes, strongest first; sort_by is stable, so ties
    // keep scan order and the result stays deterministic
    let mut peaks: Vec<(usize, usize, u32)> = Vec::new();
    for theta_idx in 0..num_thetas {
        for rho_idx in 0..num_rhos {
            let votes = accumulator[theta_idx * num_rhos + rho_idx];
            if votes >= config.hough_threshold {
                peaks.push((theta_idx, rho_idx, votes));
            }
        }
    }
    peaks.sort_by(|a, b| b.2.cmp(&a.2));

    let mut segments = Vec::new();
    let mut used = vec![false; edge_points.len()];

    for &(theta_idx, rho_idx, _) in peaks.iter().take(MAX_PEAKS) {
        let rho = rho_idx as f64 - rho_offset;
        let cos_t = cos_table[theta_idx];
        let sin_t = sin_table[theta_idx];

        // Unconsumed edge pixels close to this line, ordered along it
        let mut line_points: Vec<(i32, i32, usize)> = edge_points
            .iter()
            .enumerate()
            .filter(|(i, _)| !used[*i])
            .filter(|(_, &(x, y))| {
                let point_rho = x as f64 * cos_t + y as f64 * sin_t;
                (point_rho - rho).abs() < RHO_BAND
            })
            .map(|(i, &(x, y))| (x, y, i))
            .collect();

        if line_points.len() < 2 {
            continue;
        }

        line_points.sort_by(|a, b| {
            let proj_a = a.0 as f64 * (-sin_t) + a.1 as f64 * cos_t;
            let proj_b = b.0 as f64 * (-sin_t) + b.1 as f64 * cos_t;
            proj_a.partial_cmp(&proj_b).unwrap_or(std::cmp::Ordering::Equal)
        });

        for (run_start, run_end) in split_at_gaps(&line_points, config.max_line_gap) {
            if run_end - run_start < 1 {
                continue;
            }
            let (sx, sy, _) = line_points[run_start];
            let (ex, ey, _) = line_points[run_end];
            let segment = LineSegment::new(
                Point2D::new(sx as f64, sy as f64),
                Point2D::new(ex as f64, ey as f64),
            );

            if segment.length() >= config.min_line_length {
                for &(_, _, idx) in &line_points[run_start..=run_end] {
                    used[idx] = true;
                }
                segments.push(segment);
            }
        }
    }

    segments
}

fn collect_edge_points(edges: &GrayImage) -> Vec<(i32, i32)> {
    let mut points = Vec::new();
    for (x, y, pixel) in edges.enumerate_pixels() {
        if pixel.0[0] > 128 {
            points.push((x as i32, y as i32));
        }
    }
    points
}

/// Split an ordered point run into inclusive index ranges wherever the
/// distance between consecutive points exceeds `max_gap`
fn split_at_gaps(points: &[(i32, i32, usize)], max_gap: f64) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut run_start = 0;

    for i in 1..points.len() {
        let dx = (points[i].0 - points[i - 1].0) as f64;
        let dy = (points[i].1 - points[i - 1].1) as f64;
        if (dx * dx + dy * dy).sqrt() > max_gap {
            runs.push((run_start, i - 1));
            run_start = i;
        }
    }
    runs.push((run_start, points.len() - 1));

    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn blank_edges(size: u32) -> GrayImage {
        GrayImage::new(size, size)
    }

    fn draw_horizontal(edges: &mut GrayImage, y: u32, x_range: std::ops::Range<u32>) {
        for x in x_range {
            edges.put_pixel(x, y, Luma([255]));
        }
    }

    fn draw_vertical(edges: &mut GrayImage, x: u32, y_range: std::ops::Range<u32>) {
        for y in y_range {
            edges.put_pixel(x, y, Luma([255]));
        }
    }

    #[test]
    fn test_blank_edge_map_yields_no_lines() {
        let lines = detect_lines(&blank_edges(512), &AnalysisConfig::default());
        assert!(lines.is_empty());
    }

    #[test]
    fn test_detects_horizontal_line() {
        let mut edges = blank_edges(512);
        draw_horizontal(&mut edges, 50, 100..400);

        let lines = detect_lines(&edges, &AnalysisConfig::default());
        assert!(!lines.is_empty());

        let longest = lines
            .iter()
            .max_by(|a, b| a.length().partial_cmp(&b.length()).unwrap())
            .unwrap();
        assert!(longest.length() >= 250.0);
        assert!(longest.angle_degrees() < 2.0 || longest.angle_degrees() > 178.0);
    }

    #[test]
    fn test_detects_vertical_line() {
        let mut edges = blank_edges(512);
        draw_vertical(&mut edges, 100, 50..350);

        let lines = detect_lines(&edges, &AnalysisConfig::default());
        assert!(!lines.is_empty());

        let longest = lines
            .iter()
            .max_by(|a, b| a.length().partial_cmp(&b.length()).unwrap())
            .unwrap();
        assert!(longest.length() >= 250.0);
        assert!((longest.angle_degrees() - 90.0).abs() < 2.0);
    }

    #[test]
    fn test_gap_splits_segments() {
        let mut edges = blank_edges(512);
        // Two collinear pieces separated by 20 px, each long enough on its own
        draw_horizontal(&mut edges, 200, 100..250);
        draw_horizontal(&mut edges, 200, 270..420);

        let lines = detect_lines(&edges, &AnalysisConfig::default());
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(line.length() >= 100.0);
        }
    }

    #[test]
    fn test_short_line_below_threshold_ignored() {
        let mut edges = blank_edges(512);
        // 50 edge pixels: under both the vote threshold and the min length
        draw_horizontal(&mut edges, 50, 100..150);

        let lines = detect_lines(&edges, &AnalysisConfig::default());
        assert!(lines.is_empty());
    }

    #[test]
    fn test_detection_is_deterministic() {
        let mut edges = blank_edges(512);
        draw_horizontal(&mut edges, 80, 60..380);
        draw_vertical(&mut edges, 300, 100..460);

        let config = AnalysisConfig::default();
        let first = detect_lines(&edges, &config);
        let second = detect_lines(&edges, &config);
        assert_eq!(first, second);
    }
}
