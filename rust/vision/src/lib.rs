// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor plan wall outline extraction
//!
//! This crate turns a raster floor plan into closed, axis-rectified wall
//! loops in a resolution-independent world space:
//! 1. Binarize the image (walls become foreground)
//! 2. Trace closed contours and simplify them (Douglas-Peucker)
//! 3. Rectify long, nearly axis-aligned segments
//! 4. Re-center, scale and grid-snap into world coordinates
//!
//! # Usage
//!
//! ```rust,ignore
//! use wallplan_vision::{extract_walls, PipelineConfig};
//!
//! let bytes = std::fs::read("plan.png")?;
//! let extraction = extract_walls(&bytes, &PipelineConfig::default())?;
//! println!("{}", serde_json::to_string(&extraction)?);
//! ```

pub mod config;
pub mod contour;
pub mod error;
pub mod image_ops;
pub mod normalize;
pub mod rectify;
pub mod types;
pub mod wall_extractor;

// Re-export commonly used types and functions
pub use config::PipelineConfig;
pub use contour::{extract_contours, simplify_closed, simplify_epsilon};
pub use error::{Result, VisionError};
pub use image_ops::{decode_image, preprocess};
pub use normalize::{normalize, snap_to_grid};
pub use rectify::{rectify, rectify_segment, weld_seam};
pub use types::{
    Closure, ExtractionStats, ImageFrame, Nesting, Point2D, Polyline, WallExtraction, WallLoop,
    KNOWN_NESTING,
};
pub use wall_extractor::{extract_walls, extract_walls_from_image, extract_walls_from_mask};
