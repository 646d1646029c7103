// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall extraction pipeline: mask contours to world-space wall loops
//!
//! Every contour is handled independently, so the per-contour work runs on
//! the rayon pool. Output keeps the order the contours were discovered in.

use crate::config::PipelineConfig;
use crate::contour::{extract_contours, simplify_closed, simplify_epsilon};
use crate::error::Result;
use crate::image_ops::{decode_image, preprocess};
use crate::normalize::normalize;
use crate::rectify::rectify;
use crate::types::{ExtractionStats, ImageFrame, Polyline, WallExtraction, WallLoop};
use image::{DynamicImage, GrayImage};
use rayon::prelude::*;
use std::time::Instant;

/// Why a candidate contour did not become a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    /// Enclosed area below the noise floor (checked before simplification)
    Area,
    /// Too few vertices left after simplification
    Vertices,
}

/// Run the full pipeline on uploaded image bytes
pub fn extract_walls(bytes: &[u8], config: &PipelineConfig) -> Result<WallExtraction> {
    let image = decode_image(bytes)?;
    extract_walls_from_image(&image, config)
}

/// Run the pipeline on an already decoded image
pub fn extract_walls_from_image(image: &DynamicImage, config: &PipelineConfig) -> Result<WallExtraction> {
    config.validate()?;
    let mask = preprocess(image, config);
    extract_walls_from_mask(&mask, config)
}

/// Turn a binary mask (walls = non-zero) into wall loops
pub fn extract_walls_from_mask(mask: &GrayImage, config: &PipelineConfig) -> Result<WallExtraction> {
    let start = Instant::now();
    let frame = ImageFrame::new(mask.width(), mask.height())?;
    config.validate()?;

    let threshold = frame.rectify_threshold(config);
    let contours = extract_contours(mask);

    let outcomes: Vec<std::result::Result<WallLoop, Rejection>> = contours
        .par_iter()
        .map(|contour| assemble_wall(contour, &frame, threshold, config))
        .collect();

    let mut stats = ExtractionStats {
        contours_found: contours.len(),
        ..Default::default()
    };
    let mut walls = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            Ok(wall) => walls.push(wall),
            Err(Rejection::Area) => stats.rejected_by_area += 1,
            Err(Rejection::Vertices) => stats.rejected_by_vertices += 1,
        }
    }
    stats.walls_emitted = walls.len();
    stats.elapsed_ms = start.elapsed().as_millis() as u64;

    tracing::debug!(
        width = frame.width,
        height = frame.height,
        contours = stats.contours_found,
        rejected_by_area = stats.rejected_by_area,
        rejected_by_vertices = stats.rejected_by_vertices,
        walls = stats.walls_emitted,
        elapsed_ms = stats.elapsed_ms,
        "Extracted wall loops"
    );

    Ok(WallExtraction { walls, frame, stats })
}

/// Area floor -> simplify -> vertex floor -> rectify -> normalize
fn assemble_wall(
    contour: &Polyline,
    frame: &ImageFrame,
    threshold: f64,
    config: &PipelineConfig,
) -> std::result::Result<WallLoop, Rejection> {
    let area = contour.area();
    if area < config.min_contour_area {
        tracing::debug!(area, "Contour below area floor");
        return Err(Rejection::Area);
    }

    let simplified = simplify_closed(contour, simplify_epsilon(contour, config));
    if simplified.len() < config.min_loop_vertices {
        tracing::debug!(vertices = simplified.len(), "Simplified contour too small");
        return Err(Rejection::Vertices);
    }

    let rectified = rectify(&simplified, threshold);
    Ok(WallLoop::new(normalize(&rectified, frame, config)))
}
