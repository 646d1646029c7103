// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tunable constants for the extraction pipeline

use crate::error::{Result, VisionError};
use serde::{Deserialize, Serialize};

/// Configuration for the wall extraction pipeline
///
/// Built once and shared read-only; every stage takes it by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Gaussian blur sigma (0.8 matches a 3x3 kernel); `None` disables blur
    pub blur_sigma: Option<f32>,
    /// Equalize the luminance histogram before thresholding
    pub equalize_histogram: bool,
    /// Luminance strictly below this value is treated as wall
    pub binary_threshold: u8,
    /// Morphological closing radius (1 = 3x3 square), 0 disables
    pub close_radius: u8,
    /// Contours enclosing less than this many square pixels are noise
    pub min_contour_area: f64,
    /// Simplification epsilon as a fraction of the contour perimeter
    pub simplify_epsilon_factor: f64,
    /// Simplified loops with fewer vertices are discarded
    pub min_loop_vertices: usize,
    /// Rectify threshold as a fraction of the larger image dimension
    pub rectify_threshold_factor: f64,
    /// World scale is the larger image dimension divided by this
    pub world_scale_divisor: f64,
    /// World-space snapping grid
    pub grid_resolution: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            blur_sigma: Some(0.8),
            equalize_histogram: true,
            binary_threshold: 200,
            close_radius: 1,
            min_contour_area: 100.0,
            simplify_epsilon_factor: 0.002,
            min_loop_vertices: 4,
            rectify_threshold_factor: 0.005,
            world_scale_divisor: 50.0,
            grid_resolution: 0.05,
        }
    }
}

impl PipelineConfig {
    /// Reject values that would make a stage divide by zero or never match
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("simplify_epsilon_factor", self.simplify_epsilon_factor),
            ("rectify_threshold_factor", self.rectify_threshold_factor),
            ("world_scale_divisor", self.world_scale_divisor),
            ("grid_resolution", self.grid_resolution),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(VisionError::InvalidInput(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        if !(self.min_contour_area.is_finite() && self.min_contour_area >= 0.0) {
            return Err(VisionError::InvalidInput(format!(
                "min_contour_area must be non-negative, got {}",
                self.min_contour_area
            )));
        }

        if let Some(sigma) = self.blur_sigma {
            if !(sigma.is_finite() && sigma >= 0.0) {
                return Err(VisionError::InvalidInput(format!(
                    "blur_sigma must be non-negative, got {}",
                    sigma
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_grid() {
        let config = PipelineConfig {
            grid_resolution: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_area_floor() {
        let config = PipelineConfig {
            min_contour_area: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: PipelineConfig = serde_json::from_str(r#"{"grid_resolution": 0.1}"#).unwrap();
        assert_eq!(config.grid_resolution, 0.1);
        assert_eq!(config.min_contour_area, 100.0);
        assert_eq!(config.min_loop_vertices, 4);
    }
}
