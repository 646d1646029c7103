// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Contour extraction and closed-loop simplification

use crate::config::PipelineConfig;
use crate::types::{Point2D, Polyline};
use image::GrayImage;
use imageproc::contours::find_contours;

/// Find all closed borders in a binary mask (walls = non-zero)
///
/// Outer borders and hole borders come back in one flat list, in the order
/// the border follower discovered them. Nesting is deliberately dropped.
pub fn extract_contours(mask: &GrayImage) -> Vec<Polyline> {
    find_contours::<i32>(mask)
        .into_iter()
        .filter(|contour| !contour.points.is_empty())
        .map(|contour| {
            let mut points: Vec<Point2D> = contour
                .points
                .iter()
                .map(|p| Point2D::new(p.x as f64, p.y as f64))
                .collect();
            points.dedup();
            if points.len() > 1 && points.first() == points.last() {
                points.pop();
            }
            Polyline::closed(points)
        })
        .collect()
}

/// Simplification tolerance for a contour, proportional to its perimeter
pub fn simplify_epsilon(contour: &Polyline, config: &PipelineConfig) -> f64 {
    config.simplify_epsilon_factor * contour.perimeter()
}

/// Douglas-Peucker simplification of a closed loop
///
/// The loop is cut at two extreme vertices (the vertex farthest from the
/// vertex farthest from the start, and that farthest vertex) so the result
/// starts on a corner rather than wherever tracing happened to begin.
pub fn simplify_closed(contour: &Polyline, epsilon: f64) -> Polyline {
    let points = contour.points();
    let n = points.len();
    if n < 3 {
        return Polyline::closed(points.to_vec());
    }

    let far = farthest_from(points, 0);
    let anchor = farthest_from(points, far);
    let other = farthest_from(points, anchor);
    if anchor == other {
        return Polyline::closed(vec![points[anchor]]);
    }

    // Walk the loop starting at the anchor
    let rotated: Vec<Point2D> = (0..n).map(|i| points[(anchor + i) % n]).collect();
    let split = (other + n - anchor) % n;

    let mut first_arc = douglas_peucker(&rotated[..=split], epsilon);
    let mut second_arc_input = rotated[split..].to_vec();
    second_arc_input.push(rotated[0]);
    let second_arc = douglas_peucker(&second_arc_input, epsilon);

    // Both arcs share the split vertex; the second ends back on the anchor
    first_arc.extend_from_slice(&second_arc[1..second_arc.len() - 1]);
    Polyline::closed(first_arc)
}

/// Index of the point farthest from `points[from]`; ties keep the earliest
fn farthest_from(points: &[Point2D], from: usize) -> usize {
    let origin = points[from];
    let mut best = from;
    let mut best_dist = 0.0;
    for (i, point) in points.iter().enumerate() {
        let dist = origin.distance_to(point);
        if dist > best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best
}

/// Douglas-Peucker line simplification algorithm (open curve)
fn douglas_peucker(points: &[Point2D], epsilon: f64) -> Vec<Point2D> {
    if points.len() < 3 {
        return points.to_vec();
    }

    // Find the point with maximum distance from line between first and last
    let first = &points[0];
    let last = &points[points.len() - 1];

    let mut max_dist = 0.0;
    let mut max_idx = 0;

    for (i, point) in points.iter().enumerate().skip(1).take(points.len() - 2) {
        let dist = perpendicular_distance(point, first, last);
        if dist > max_dist {
            max_dist = dist;
            max_idx = i;
        }
    }

    if max_dist > epsilon {
        let left = douglas_peucker(&points[..=max_idx], epsilon);
        let right = douglas_peucker(&points[max_idx..], epsilon);

        // Combine results (excluding duplicate point at max_idx)
        let mut result = left;
        result.extend_from_slice(&right[1..]);
        result
    } else {
        vec![*first, *last]
    }
}

/// Calculate perpendicular distance from point to line
fn perpendicular_distance(point: &Point2D, line_start: &Point2D, line_end: &Point2D) -> f64 {
    let dx = line_end.x - line_start.x;
    let dy = line_end.y - line_start.y;
    let length_sq = dx * dx + dy * dy;

    if length_sq < 1e-10 {
        return point.distance_to(line_start);
    }

    let length = length_sq.sqrt();
    ((point.x - line_start.x) * dy - (point.y - line_start.y) * dx).abs() / length
}
