// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall rectification: force long, nearly axis-aligned segments to be
//! exactly horizontal or vertical.
//!
//! Short segments (wall thickness edges, chamfers, notches) are left alone so
//! the outline keeps its shape. The pass is a left fold: every point is
//! compared with the *already adjusted* previous point, so a correction on
//! one vertex carries into the next comparison. The first point is the fixed
//! anchor and is never moved. Because of this the result depends on where the
//! walk starts; rotating the input can change what happens near the seam.
//!
//! After the fold, a separate seam-weld step compares the last point with
//! the first regardless of segment length and snaps whichever axes are
//! within the threshold.
//!
//! A second pass usually changes nothing. The exception is a weld that
//! stretches a short segment next to the seam past the length gate; the next
//! pass then snaps that segment too.

use crate::types::{Point2D, Polyline};

/// Rectify a polyline against a pixel threshold
///
/// Loops with fewer than 2 points come back unchanged.
pub fn rectify(polyline: &Polyline, threshold: f64) -> Polyline {
    let points = polyline.points();
    if points.len() < 2 {
        return polyline.clone();
    }

    let mut rectified = Vec::with_capacity(points.len());
    rectified.push(points[0]);
    let rectified = points[1..].iter().fold(rectified, |mut acc, &current| {
        let previous = acc[acc.len() - 1];
        acc.push(rectify_segment(previous, current, threshold));
        acc
    });

    let mut result = Polyline::new(rectified, polyline.closure());
    if polyline.is_closed() {
        weld_seam(result.points_mut(), threshold);
    }
    result
}

/// Snap `current` relative to the already rectified `previous`
///
/// Only segments longer than twice the threshold qualify. A segment can be
/// snapped on at most one axis; vertical (`x` copied) is checked first.
pub fn rectify_segment(previous: Point2D, current: Point2D, threshold: f64) -> Point2D {
    let dx = (current.x - previous.x).abs();
    let dy = (current.y - previous.y).abs();
    let length = (dx * dx + dy * dy).sqrt();

    if length <= 2.0 * threshold {
        return current;
    }

    if dx < threshold {
        Point2D::new(previous.x, current.y)
    } else if dy < threshold {
        Point2D::new(current.x, previous.y)
    } else {
        current
    }
}

/// Close the loop by snapping the last point onto the first where it is near
///
/// Both axes near merges the two points; one axis near aligns only that axis;
/// otherwise the seam stays open. Applies to loops of more than 2 points.
pub fn weld_seam(points: &mut [Point2D], threshold: f64) {
    let n = points.len();
    if n <= 2 {
        return;
    }

    let first = points[0];
    let last = &mut points[n - 1];
    let dx = (first.x - last.x).abs();
    let dy = (first.y - last.y).abs();

    if dx < threshold && dy < threshold {
        *last = first;
    } else if dx < threshold {
        last.x = first.x;
    } else if dy < threshold {
        last.y = first.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    /// Threshold for a 500x500 frame at the default factor
    const THRESHOLD: f64 = 2.5;

    #[test]
    fn test_single_point_is_unchanged() {
        let line = Polyline::closed(vec![p(3.0, 4.0)]);
        assert_eq!(rectify(&line, THRESHOLD), line);
    }

    #[test]
    fn test_jittered_square_collapses_to_shared_axes() {
        let line = Polyline::closed(vec![
            p(100.0, 100.0),
            p(401.0, 102.0),
            p(399.0, 398.0),
            p(101.5, 399.5),
        ]);

        let result = rectify(&line, THRESHOLD);
        let pts = result.points();

        assert_eq!(pts[0], p(100.0, 100.0));
        assert_eq!(pts[1], p(401.0, 100.0));
        assert_eq!(pts[2], p(401.0, 398.0));
        // Folded: y from the previous rectified point, then x welded to the anchor
        assert_eq!(pts[3], p(100.0, 398.0));

        for (a, b) in result.segments() {
            assert!(a.x == b.x || a.y == b.y, "segment {:?} -> {:?} not axis aligned", a, b);
        }
    }

    #[test]
    fn test_fold_uses_adjusted_previous_point() {
        // Against the original (2, 50) the last segment is diagonal; against
        // the rectified (0, 50) it is vertical.
        let line = Polyline::open(vec![p(0.0, 0.0), p(2.0, 50.0), p(-1.0, 100.0)]);
        let result = rectify(&line, THRESHOLD);
        assert_eq!(result.points(), &[p(0.0, 0.0), p(0.0, 50.0), p(0.0, 100.0)]);
    }

    #[test]
    fn test_short_segments_are_preserved() {
        // 4 px notch is shorter than 2 x threshold
        let line = Polyline::closed(vec![
            p(0.0, 0.0),
            p(200.0, 1.0),
            p(203.0, 4.0),
            p(203.0, 200.0),
            p(0.0, 200.0),
        ]);
        let result = rectify(&line, THRESHOLD);
        let pts = result.points();

        assert_eq!(pts[1], p(200.0, 0.0));
        // Short segment: copied verbatim
        assert_eq!(pts[2], p(203.0, 4.0));
    }

    #[test]
    fn test_short_segments_keep_identical_endpoints() {
        let line = Polyline::open(vec![p(10.0, 10.0), p(11.0, 12.0), p(13.0, 11.5), p(12.0, 14.0)]);
        assert_eq!(rectify(&line, THRESHOLD), line);
    }

    #[test]
    fn test_diagonal_segments_are_untouched() {
        let line = Polyline::open(vec![p(0.0, 0.0), p(100.0, 100.0), p(200.0, 150.0)]);
        assert_eq!(rectify(&line, THRESHOLD), line);
    }

    #[test]
    fn test_segment_snap_cases() {
        // Too short to qualify
        assert_eq!(rectify_segment(p(0.0, 0.0), p(3.0, 3.0), 4.0), p(3.0, 3.0));
        // Long enough but off-axis on both
        assert_eq!(rectify_segment(p(0.0, 0.0), p(1.0, 1.0), 0.6), p(1.0, 1.0));
        assert_eq!(rectify_segment(p(0.0, 0.0), p(0.5, 10.0), 1.0), p(0.0, 10.0));
        assert_eq!(rectify_segment(p(5.0, 2.0), p(40.0, 2.75), 1.0), p(40.0, 2.0));
    }

    #[test]
    fn test_seam_weld_merges_when_both_axes_are_near() {
        let mut line = Polyline::closed(vec![p(0.0, 0.0), p(100.0, 0.0), p(100.0, 100.0), p(1.0, 1.5)]);
        weld_seam(line.points_mut(), THRESHOLD);
        assert_eq!(line.points()[3], p(0.0, 0.0));
    }

    #[test]
    fn test_seam_weld_single_axis_and_open_seam() {
        let mut line = Polyline::closed(vec![p(0.0, 0.0), p(100.0, 0.0), p(100.0, 100.0), p(1.0, 100.0)]);
        weld_seam(line.points_mut(), THRESHOLD);
        assert_eq!(line.points()[3], p(0.0, 100.0));

        let mut diagonal = Polyline::closed(vec![p(0.0, 0.0), p(100.0, 0.0), p(60.0, 60.0)]);
        weld_seam(diagonal.points_mut(), THRESHOLD);
        assert_eq!(diagonal.points()[2], p(60.0, 60.0));
    }

    #[test]
    fn test_seam_weld_ignores_segment_length() {
        // Seam is shorter than 2 x threshold but still welded
        let line = Polyline::closed(vec![p(0.0, 0.0), p(100.0, 50.0), p(50.0, 100.0), p(2.0, -2.0)]);
        let result = rectify(&line, THRESHOLD);
        assert_eq!(result.points()[3], p(0.0, 0.0));
    }

    #[test]
    fn test_anchor_is_never_moved() {
        let line = Polyline::closed(vec![p(7.25, 3.5), p(300.0, 4.0), p(301.0, 300.0), p(8.0, 301.0)]);
        let result = rectify(&line, THRESHOLD);
        assert_eq!(result.points()[0], p(7.25, 3.5));
    }

    #[test]
    fn test_rectify_is_idempotent_on_settled_loop() {
        let line = Polyline::closed(vec![
            p(100.0, 100.0),
            p(401.0, 102.0),
            p(399.0, 398.0),
            p(250.0, 300.0),
            p(252.0, 302.0),
            p(101.5, 401.0),
        ]);
        let once = rectify(&line, THRESHOLD);
        let twice = rectify(&once, THRESHOLD);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_weld_can_lengthen_segment_for_next_pass() {
        let line = Polyline::closed(vec![p(0.0, 0.0), p(0.0, 50.0), p(9.0, 6.5), p(10.0, 2.0)]);

        // (9, 6.5) -> (10, 2) is under the length gate, then the weld drops
        // the last point onto y = 0 and the segment grows past it
        let once = rectify(&line, THRESHOLD);
        assert_eq!(once.points()[2], p(9.0, 6.5));
        assert_eq!(once.points()[3], p(10.0, 0.0));

        let twice = rectify(&once, THRESHOLD);
        assert_eq!(twice.points()[3], p(9.0, 0.0));
        assert_ne!(once, twice);
    }

    #[test]
    fn test_rotated_start_differs_only_near_seam() {
        let pts = vec![
            p(100.0, 100.0),
            p(300.0, 101.0),
            p(301.0, 200.0),
            p(400.0, 202.0),
            p(401.0, 400.0),
            p(99.0, 399.0),
        ];
        let original = rectify(&Polyline::closed(pts.clone()), THRESHOLD);

        let mut rotated_pts = pts.clone();
        rotated_pts.rotate_left(2);
        let rotated = rectify(&Polyline::closed(rotated_pts), THRESHOLD);

        // Undo the rotation so indices refer to the same input vertices
        let mut realigned = rotated.into_points();
        realigned.rotate_right(2);

        // Every vertex stays within the threshold of its counterpart
        for (a, b) in original.points().iter().zip(&realigned) {
            assert!((a.x - b.x).abs() < THRESHOLD && (a.y - b.y).abs() < THRESHOLD);
        }

        // Vertices away from both seams agree exactly
        assert_eq!(original.points()[3], realigned[3]);
    }
}
