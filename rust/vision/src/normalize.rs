// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pixel to world coordinate mapping
//!
//! World space is centered on the image and scaled by the larger image
//! dimension, so a plan scanned at twice the resolution lands on the same
//! coordinates (up to the snapping grid).

use crate::config::PipelineConfig;
use crate::types::{ImageFrame, Point2D, Polyline};

/// Map a pixel-space loop into snapped world coordinates
pub fn normalize(polyline: &Polyline, frame: &ImageFrame, config: &PipelineConfig) -> Vec<Point2D> {
    let center_x = frame.width as f64 / 2.0;
    let center_y = frame.height as f64 / 2.0;
    let scale = frame.world_scale(config);

    polyline
        .points()
        .iter()
        .map(|p| {
            Point2D::new(
                snap_to_grid((p.x - center_x) / scale, config.grid_resolution),
                snap_to_grid((p.y - center_y) / scale, config.grid_resolution),
            )
        })
        .collect()
}

/// Round to the nearest multiple of `resolution`, halfway cases to the even step
pub fn snap_to_grid(value: f64, resolution: f64) -> f64 {
    let snapped = (value / resolution).round_ties_even() * resolution;
    // Avoid emitting -0.0
    if snapped == 0.0 {
        0.0
    } else {
        snapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn on_grid(value: f64, resolution: f64) -> bool {
        let steps = value / resolution;
        (steps - steps.round()).abs() * resolution < 1e-9
    }

    #[test]
    fn test_center_maps_to_origin() {
        let frame = ImageFrame::new(500, 300).unwrap();
        let line = Polyline::closed(vec![Point2D::new(250.0, 150.0)]);
        let world = normalize(&line, &frame, &PipelineConfig::default());
        assert_eq!(world, vec![Point2D::new(0.0, 0.0)]);
        assert!(world[0].x.is_sign_positive());
    }

    #[test]
    fn test_scale_uses_larger_dimension() {
        let frame = ImageFrame::new(500, 300).unwrap();
        let line = Polyline::closed(vec![Point2D::new(100.0, 50.0), Point2D::new(400.0, 250.0)]);
        let world = normalize(&line, &frame, &PipelineConfig::default());

        assert_abs_diff_eq!(world[0].x, -15.0, epsilon = 1e-9);
        assert_abs_diff_eq!(world[0].y, -10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(world[1].x, 15.0, epsilon = 1e-9);
        assert_abs_diff_eq!(world[1].y, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_snap_to_grid() {
        assert_abs_diff_eq!(snap_to_grid(1.02, 0.05), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(snap_to_grid(1.03, 0.05), 1.05, epsilon = 1e-12);
        assert_abs_diff_eq!(snap_to_grid(-0.26, 0.05), -0.25, epsilon = 1e-12);
        assert_eq!(snap_to_grid(-0.01, 0.05), 0.0);
    }

    #[test]
    fn test_half_grid_ties_round_to_even_step() {
        // World scale 40: one pixel off center is exactly half a grid step
        let frame = ImageFrame::new(2000, 2000).unwrap();
        let line = Polyline::closed(vec![Point2D::new(1001.0, 1005.0), Point2D::new(999.0, 995.0)]);
        let world = normalize(&line, &frame, &PipelineConfig::default());

        assert_eq!(world[0].x, 0.0);
        assert_abs_diff_eq!(world[0].y, 0.1, epsilon = 1e-12);
        assert_eq!(world[1].x, 0.0);
        assert!(world[1].x.is_sign_positive());
        assert_abs_diff_eq!(world[1].y, -0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_every_output_is_on_grid() {
        let frame = ImageFrame::new(733, 519).unwrap();
        let config = PipelineConfig::default();
        let points: Vec<Point2D> = (0..200)
            .map(|i| Point2D::new(i as f64 * 3.37 + 0.123, 519.0 - i as f64 * 2.11))
            .collect();
        let world = normalize(&Polyline::closed(points), &frame, &config);

        for p in world {
            assert!(on_grid(p.x, config.grid_resolution), "x = {} off grid", p.x);
            assert!(on_grid(p.y, config.grid_resolution), "y = {} off grid", p.y);
        }
    }

    #[test]
    fn test_resolution_independence() {
        let config = PipelineConfig::default();
        let small = ImageFrame::new(500, 500).unwrap();
        let large = ImageFrame::new(1000, 1000).unwrap();

        let a = normalize(
            &Polyline::closed(vec![Point2D::new(120.0, 380.0)]),
            &small,
            &config,
        );
        let b = normalize(
            &Polyline::closed(vec![Point2D::new(240.0, 760.0)]),
            &large,
            &config,
        );

        assert_abs_diff_eq!(a[0].x, b[0].x, epsilon = 1e-9);
        assert_abs_diff_eq!(a[0].y, b[0].y, epsilon = 1e-9);
    }
}
