// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Orientation bucketing and the perspective heuristic

use crate::types::{AnalysisConfig, LineSegment, Orientation, PerspectiveAnalysis};

/// Tolerates float rounding at the band edges (a segment constructed at
/// exactly 10° must land in the horizontal bucket)
const ANGLE_EPS: f64 = 1e-9;

/// Bucket a segment by its orientation angle
///
/// Horizontal takes precedence over vertical, vertical over diagonal;
/// every segment lands in exactly one bucket. With the default bands:
/// angle <= 10° or >= 170° is horizontal, 80° < angle < 100° is vertical,
/// anything else is diagonal.
pub fn orientation(segment: &LineSegment, config: &AnalysisConfig) -> Orientation {
    let angle = segment.angle_degrees();
    let wrap_min = 180.0 - config.horizontal_max_angle;
    let (vertical_min, vertical_max) = config.vertical_band;

    if angle <= config.horizontal_max_angle + ANGLE_EPS || angle >= wrap_min - ANGLE_EPS {
        Orientation::Horizontal
    } else if angle > vertical_min + ANGLE_EPS && angle < vertical_max - ANGLE_EPS {
        Orientation::Vertical
    } else {
        Orientation::Diagonal
    }
}

/// Classify a segment set into the perspective summary
///
/// Pure and total: degenerate inputs (no segments at all) produce a valid
/// all-zero record with `has_perspective == false`.
pub fn classify(segments: &[LineSegment], config: &AnalysisConfig) -> PerspectiveAnalysis {
    let mut horizontal = 0;
    let mut vertical = 0;
    let mut diagonal = 0;

    for segment in segments {
        match orientation(segment, config) {
            Orientation::Horizontal => horizontal += 1,
            Orientation::Vertical => vertical += 1,
            Orientation::Diagonal => diagonal += 1,
        }
    }

    PerspectiveAnalysis {
        total_lines: segments.len(),
        horizontal_lines: horizontal,
        vertical_lines: vertical,
        diagonal_lines: diagonal,
        has_perspective: diagonal > config.min_diagonals_for_perspective,
    }
}
