// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Walkthrough of the structural-analysis pipeline on a synthetic photo
//!
//! Run with: cargo run -p archiform-vision --example pipeline_demo

use archiform_vision::{
    classify, detect_lines, enhance, extract_edges, resize_to_canvas, AnalysisConfig,
};
use image::{DynamicImage, Rgb, RgbImage};

fn main() {
    println!("=== Structural Analysis Pipeline Demo ===\n");

    let config = AnalysisConfig::default();
    let photo = synthetic_building_photo();
    println!("Synthetic photo: {}x{}", photo.width(), photo.height());

    // Step 1: normalize onto the square canvas
    let canvas = resize_to_canvas(
        &DynamicImage::ImageRgb8(photo),
        config.target_size,
        config.background,
    );
    println!("Canvas: {}x{}", canvas.width(), canvas.height());

    // Step 2: enhancement chain (contrast, sharpness, median)
    let enhanced = enhance(&canvas, &config);
    println!("Enhanced: {}x{}", enhanced.width(), enhanced.height());

    // Step 3: edge extraction
    let edges = extract_edges(&canvas, &config);
    let edge_count = edges.pixels().filter(|p| p.0[0] > 128).count();
    println!("Edge pixels: {}", edge_count);

    // Step 4: line detection
    let lines = detect_lines(&edges, &config);
    println!("Line segments: {}", lines.len());
    for (i, line) in lines.iter().enumerate() {
        println!(
            "  {:2}: ({:6.1},{:6.1})->({:6.1},{:6.1}) | len={:6.1}px angle={:5.1}°",
            i,
            line.start.x,
            line.start.y,
            line.end.x,
            line.end.y,
            line.length(),
            line.angle_degrees()
        );
    }

    // Step 5: perspective classification
    let analysis = classify(&lines, &config);
    println!("\nAnalysis:");
    println!("  Total lines:      {}", analysis.total_lines);
    println!("  Horizontal:       {}", analysis.horizontal_lines);
    println!("  Vertical:         {}", analysis.vertical_lines);
    println!("  Diagonal:         {}", analysis.diagonal_lines);
    println!("  Has perspective:  {}", analysis.has_perspective);

    println!("\n=== Demo Complete ===");
}

/// Build a simple 800x600 "building photo": sky background, gray facade
/// rectangle with a black outline, and a grid of windows
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
