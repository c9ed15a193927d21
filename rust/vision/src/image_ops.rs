// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pixel-level operations: grayscale conversion, enhancement, edge extraction

use crate::types::AnalysisConfig;
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::filter::median_filter;

/// Convert to single-channel intensity
pub fn to_grayscale(image: &RgbImage) -> GrayImage {
    let mut gray = GrayImage::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        gray.put_pixel(x, y, Luma([luminance(pixel).round() as u8]));
    }
    gray
}

/// Standard luminance formula (ITU-R BT.601)
fn luminance(pixel: &Rgb<u8>) -> f32 {
    let [r, g, b] = pixel.0;
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

/// Extract a binary edge map via Canny with hysteresis thresholds
///
/// Pixels above the high threshold are always edges; pixels between the
/// thresholds are edges only when connected to a strong edge. The output
/// has the same dimensions as the input, with edges marked 255.
pub fn extract_edges(image: &RgbImage, config: &AnalysisConfig) -> GrayImage {
    let gray = to_grayscale(image);
    imageproc::edges::canny(&gray, config.canny_low, config.canny_high)
}

/// Quality enhancement chain: contrast, sharpness, median denoise
///
/// Order matters: sharpening after the contrast boost amplifies edges
/// consistently, and the median pass removes speckle the sharpening
/// introduces. Deterministic for a given input.
pub fn enhance(image: &RgbImage, config: &AnalysisConfig) -> RgbImage {
    let contrasted = adjust_contrast(image, config.contrast_factor);
    let sharpened = adjust_sharpness(&contrasted, config.sharpness_factor);
    median_filter(&sharpened, config.median_radius, config.median_radius)
}

/// Contrast adjustment by linear blend around the mean luminance
///
/// Factor 1.0 is a no-op; >1.0 pushes channel values away from the
/// image-wide gray mean.
pub fn adjust_contrast(image: &RgbImage, factor: f32) -> RgbImage {
    let mean = mean_luminance(image);
    let mut result = RgbImage::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        let mut out = [0u8; 3];
        for (c, &value) in pixel.0.iter().enumerate() {
            out[c] = blend_channel(mean, value, factor);
        }
        result.put_pixel(x, y, Rgb(out));
    }
    result
}

/// Sharpness adjustment by linear blend against a 3x3-smoothed copy
///
/// Factor 1.0 is a no-op; >1.0 exaggerates the difference from the
/// smoothed image.
pub fn adjust_sharpness(image: &RgbImage, factor: f32) -> RgbImage {
    let smoothed = smooth3x3(image);
    let mut result = RgbImage::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        let base = smoothed.get_pixel(x, y);
        let mut out = [0u8; 3];
        for c in 0..3 {
            out[c] = blend_channel(base.0[c] as f32, pixel.0[c], factor);
        }
        result.put_pixel(x, y, Rgb(out));
    }
    result
}

fn blend_channel(base: f32, value: u8, factor: f32) -> u8 {
    (base + factor * (value as f32 - base)).clamp(0.0, 255.0).round() as u8
}

fn mean_luminance(image: &RgbImage) -> f32 {
    let pixel_count = (image.width() * image.height()) as f64;
    if pixel_count == 0.0 {
        return 0.0;
    }
    let sum: f64 = image.pixels().map(|p| luminance(p) as f64).sum();
    (sum / pixel_count) as f32
}

/// 3x3 smoothing with a center-weighted kernel, edges clamped
fn smooth3x3(image: &RgbImage) -> RgbImage {
    const WEIGHTS: [[f32; 3]; 3] = [[1.0, 1.0, 1.0], [1.0, 5.0, 1.0], [1.0, 1.0, 1.0]];
    const WEIGHT_SUM: f32 = 13.0;

    let width = image.width() as i64;
    let height = image.height() as i64;
    let mut result = RgbImage::new(image.width(), image.height());

    for y in 0..height {
        for x in 0..width {
            let mut acc = [0.0f32; 3];
            for (ky, row) in WEIGHTS.iter().enumerate() {
                for (kx, &weight) in row.iter().enumerate() {
                    let sx = (x + kx as i64 - 1).clamp(0, width - 1) as u32;
                    let sy = (y + ky as i64 - 1).clamp(0, height - 1) as u32;
                    let sample = image.get_pixel(sx, sy);
                    for c in 0..3 {
                        acc[c] += weight * sample.0[c] as f32;
                    }
                }
            }
            let out = [
                (acc[0] / WEIGHT_SUM).round() as u8,
                (acc[1] / WEIGHT_SUM).round() as u8,
                (acc[2] / WEIGHT_SUM).round() as u8,
            ];
            result.put_pixel(x as u32, y as u32, Rgb(out));
        }
    }

    result
}
