// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: Extract wall loops from a floor plan image as JSON
//!
//! Usage:
//!   floorplan-walls <image_path> [options]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use wallplan_vision::{decode_image, extract_walls_from_image, preprocess, PipelineConfig};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let image_path = &args[1];
    let mut config = PipelineConfig::default();
    let mut output_path: Option<String> = None;
    let mut show_stats = false;
    let mut save_mask = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--min-area" => {
                i += 1;
                config.min_contour_area = parse_value(&args, i, "--min-area");
            }
            "--epsilon" => {
                i += 1;
                config.simplify_epsilon_factor = parse_value(&args, i, "--epsilon");
            }
            "--rectify" => {
                i += 1;
                config.rectify_threshold_factor = parse_value(&args, i, "--rectify");
            }
            "--grid" => {
                i += 1;
                config.grid_resolution = parse_value(&args, i, "--grid");
            }
            "--threshold" => {
                i += 1;
                config.binary_threshold = parse_value(&args, i, "--threshold");
            }
            "--no-blur" => {
                config.blur_sigma = None;
            }
            "--output" => {
                i += 1;
                output_path = Some(parse_value(&args, i, "--output"));
            }
            "--stats" => {
                show_stats = true;
            }
            "--debug" => {
                save_mask = true;
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let bytes = fs::read(image_path).unwrap_or_else(|e| {
        eprintln!("Error: Cannot read image '{}': {}", image_path, e);
        std::process::exit(1);
    });

    let image = decode_image(&bytes).unwrap_or_else(|e| {
        eprintln!("Error: Cannot decode image '{}': {}", image_path, e);
        std::process::exit(1);
    });

    if save_mask {
        let mask = preprocess(&image, &config);
        let mask_path = mask_path_for(Path::new(image_path));
        match mask.save(&mask_path) {
            Ok(()) => eprintln!("Saved binary mask: {}", mask_path.display()),
            Err(e) => eprintln!("Warning: Cannot save mask '{}': {}", mask_path.display(), e),
        }
    }

    let extraction = extract_walls_from_image(&image, &config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if show_stats {
        let stats = &extraction.stats;
        eprintln!("Image size:           {}x{} px", extraction.frame.width, extraction.frame.height);
        eprintln!("Contours found:       {}", stats.contours_found);
        eprintln!("Rejected (area):      {}", stats.rejected_by_area);
        eprintln!("Rejected (vertices):  {}", stats.rejected_by_vertices);
        eprintln!("Wall loops:           {}", stats.walls_emitted);
        eprintln!("Elapsed:              {} ms", stats.elapsed_ms);
    }

    let json = serde_json::to_string_pretty(&extraction).unwrap_or_else(|e| {
        eprintln!("Error: Cannot serialize result: {}", e);
        std::process::exit(1);
    });

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, json) {
                eprintln!("Error: Cannot write '{}': {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Wrote {} wall loops to {}", extraction.walls.len(), path);
        }
        None => println!("{}", json),
    }
}

/// `<dir>/<stem>_mask.png`, beside the input image
fn mask_path_for(image_path: &Path) -> PathBuf {
    let stem = image_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("floorplan");
    image_path.with_file_name(format!("{}_mask.png", stem))
}

fn parse_value<T: FromStr>(args: &[String], index: usize, flag: &str) -> T {
    args.get(index)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_else(|| {
            eprintln!("Error: Missing or invalid value for {}", flag);
            std::process::exit(1);
        })
}

fn print_usage() {
    println!(
        r#"Floor Plan Wall Extractor
=========================

Extracts closed wall outlines from a floor plan image and prints them as
JSON in world units centered on the image.

USAGE:
  floorplan-walls <image_path> [OPTIONS]

ARGUMENTS:
  <image_path>              Path to floor plan image (PNG, JPEG, BMP)

OPTIONS:
  --min-area <px2>          Contour area noise floor (default: 100)
  --epsilon <factor>        Simplification epsilon per perimeter (default: 0.002)
  --rectify <factor>        Rectify threshold per image size (default: 0.005)
  --grid <units>            World grid resolution (default: 0.05)
  --threshold <0-255>       Luminance below this is wall (default: 200)
  --no-blur                 Skip the Gaussian blur
  --output <path>           Write JSON to a file instead of stdout
  --stats                   Print extraction statistics to stderr
  --debug                   Save the binary wall mask next to the input
  -h, --help                Show this help message
"#
    );
}
