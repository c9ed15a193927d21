// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: structural analysis of architectural photographs
//!
//! Analyzes a single photo (edge extraction, line detection, perspective
//! estimation) or batch-normalizes a whole directory.
//!
//! Usage:
//!   structure-scan <image_or_directory> [options]

use archiform_vision::{
    analyze_perspective, enhance, load_image, process_directory, resize_to_canvas,
    AnalysisConfig, OutputSink,
};
use std::env;
use std::path::Path;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let input = &args[1];

    let mut config = AnalysisConfig::default();
    let mut data_root = String::from("data/training_data");
    let mut save_output = false;
    let mut json_output = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--data-root" => {
                i += 1;
                data_root = args[i].clone();
            }
            "--target-size" => {
                i += 1;
                config.target_size = args[i].parse().expect("Invalid target size");
            }
            "--hough-threshold" => {
                i += 1;
                config.hough_threshold = args[i].parse().expect("Invalid Hough threshold");
            }
            "--save" => {
                save_output = true;
            }
            "--json" => {
                json_output = true;
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let path = Path::new(input);
    let sink = OutputSink::new(&data_root);

    if path.is_dir() {
        run_batch(path, &sink, &config);
    } else {
        run_single(path, &sink, &config, save_output, json_output);
    }
}

fn run_single(
    path: &Path,
    sink: &OutputSink,
    config: &AnalysisConfig,
    save_output: bool,
    json_output: bool,
) {
    println!("[1/2] Analyzing structure: {}", path.display());
    let analysis = analyze_perspective(path, config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if json_output {
        println!("{}", serde_json::to_string_pretty(&analysis).unwrap());
    } else {
        println!("  Total lines:      {}", analysis.total_lines);
        println!("  Horizontal:       {}", analysis.horizontal_lines);
        println!("  Vertical:         {}", analysis.vertical_lines);
        println!("  Diagonal:         {}", analysis.diagonal_lines);
        println!("  Has perspective:  {}", analysis.has_perspective);
    }

    if !save_output {
        return;
    }

    println!("[2/2] Normalizing to {}x{} canvas...", config.target_size, config.target_size);
    let image = load_image(path).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let canvas = resize_to_canvas(&image, config.target_size, config.background);
    let processed = enhance(&canvas, config);

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    match sink.save(&processed, &name, "processed") {
        Ok(out) => println!("  Saved: {}", out.display()),
        Err(e) => {
            eprintln!("Error saving output: {}", e);
            std::process::exit(1);
        }
    }
    match sink.save_thumbnail(&image, &name, config.thumbnail_size) {
        Ok(out) => println!("  Thumbnail: {}", out.display()),
        Err(e) => eprintln!("Warning: could not save thumbnail: {}", e),
    }
}

fn run_batch(dir: &Path, sink: &OutputSink, config: &AnalysisConfig) {
    println!("Batch processing directory: {}", dir.display());
    let report = process_directory(dir, sink, config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    println!("  {} of {} processed", report.processed(), report.total());
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(output) => println!("  ok   {} -> {}", outcome.input.display(), output.display()),
            Err(error) => println!("  FAIL {} ({})", outcome.input.display(), error),
        }
    }

    if report.failed() > 0 {
        std::process::exit(2);
    }
}

fn print_usage() {
    println!(
        r#"Architectural Photo Structure Scanner
======================================

Analyzes line structure and perspective in building photographs, or
batch-normalizes a directory of photos onto fixed-size canvases.

USAGE:
  structure-scan <image_or_directory> [OPTIONS]

ARGUMENTS:
  <image_or_directory>      Photo (.jpg/.jpeg/.png/.bmp/.tiff) or folder

OPTIONS:
  --data-root <dir>         Output root (default: data/training_data)
  --target-size <px>        Canvas edge length (default: 512)
  --hough-threshold <n>     Line-detector vote threshold (default: 100)
  --save                    Also save the normalized/enhanced image
  --json                    Print the analysis record as JSON
  -h, --help                Show this help message

EXAMPLES:
  # Perspective analysis of one photo
  structure-scan facade.jpg --json

  # Normalize every photo in a folder
  structure-scan ./uploads --data-root data/training_data
"#
    );
}
