// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for wall outline extraction

use crate::config::PipelineConfig;
use crate::error::{Result, VisionError};
use serde::{Deserialize, Serialize, Serializer};

/// A 2D point, in pixel space or world space depending on the stage
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

/// Whether the segment from the last point back to the first belongs to the shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closure {
    Open,
    Closed,
}

/// Ordered point sequence with an explicit closure flag
///
/// Point order is the walk direction produced by contour tracing and is
/// significant: the rectifier folds over it left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    points: Vec<Point2D>,
    closure: Closure,
}

impl Polyline {
    pub fn new(points: Vec<Point2D>, closure: Closure) -> Self {
        Self { points, closure }
    }

    /// A closed loop; the last point implicitly connects back to the first
    pub fn closed(points: Vec<Point2D>) -> Self {
        Self::new(points, Closure::Closed)
    }

    pub fn open(points: Vec<Point2D>) -> Self {
        Self::new(points, Closure::Open)
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [Point2D] {
        &mut self.points
    }

    pub fn into_points(self) -> Vec<Point2D> {
        self.points
    }

    pub fn closure(&self) -> Closure {
        self.closure
    }

    pub fn is_closed(&self) -> bool {
        self.closure == Closure::Closed
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive point pairs, including the closing pair for closed loops
    pub fn segments(&self) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
        let n = self.points.len();
        let count = match self.closure {
            Closure::Closed if n > 1 => n,
            _ => n.saturating_sub(1),
        };
        (0..count).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Enclosed area using the shoelace formula (absolute value)
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }

        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            area += self.points[i].x * self.points[j].y;
            area -= self.points[j].x * self.points[i].y;
        }

        (area / 2.0).abs()
    }

    /// Total length of all segments
    pub fn perimeter(&self) -> f64 {
        self.segments().map(|(a, b)| a.distance_to(&b)).sum()
    }
}

/// Source image dimensions; every size-derived threshold comes from here
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFrame {
    pub width: u32,
    pub height: u32,
}

impl ImageFrame {
    /// Fails fast on degenerate frames instead of dividing by zero downstream
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(VisionError::InvalidInput(format!(
                "image dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    pub fn max_dimension(&self) -> f64 {
        self.width.max(self.height) as f64
    }

    /// Segment-length unit used by the rectifier, in pixels
    pub fn rectify_threshold(&self, config: &PipelineConfig) -> f64 {
        self.max_dimension() * config.rectify_threshold_factor
    }

    /// Pixels per world unit
    pub fn world_scale(&self, config: &PipelineConfig) -> f64 {
        self.max_dimension() / config.world_scale_divisor
    }
}

/// Nesting of a wall loop relative to other loops
///
/// The contour list handed to the assembler is flat, so no loop is ever
/// classified today. A topology-aware extractor would add `Outer`/`Inner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Nesting {
    #[default]
    Unclassified,
}

impl Nesting {
    pub fn is_inner(&self) -> bool {
        match self {
            Nesting::Unclassified => false,
        }
    }
}

/// Nesting assigned to every emitted loop (known limitation: no hole detection)
pub const KNOWN_NESTING: Nesting = Nesting::Unclassified;

fn serialize_is_inner<S: Serializer>(nesting: &Nesting, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_bool(nesting.is_inner())
}

/// A closed wall boundary in world space
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WallLoop {
    pub points: Vec<Point2D>,
    #[serde(rename = "isInner", serialize_with = "serialize_is_inner")]
    pub nesting: Nesting,
}

impl WallLoop {
    pub fn new(points: Vec<Point2D>) -> Self {
        Self {
            points,
            nesting: KNOWN_NESTING,
        }
    }

    pub fn is_inner(&self) -> bool {
        self.nesting.is_inner()
    }
}

/// Counters collected while assembling a result
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionStats {
    /// Raw contours found in the mask
    pub contours_found: usize,
    /// Rejected below the area noise floor
    pub rejected_by_area: usize,
    /// Rejected with too few vertices after simplification
    pub rejected_by_vertices: usize,
    /// Loops emitted
    pub walls_emitted: usize,
    pub elapsed_ms: u64,
}

/// Complete extraction result
#[derive(Debug, Clone, Serialize)]
pub struct WallExtraction {
    pub walls: Vec<WallLoop>,
    #[serde(skip)]
    pub frame: ImageFrame,
    #[serde(skip)]
    pub stats: ExtractionStats,
}
