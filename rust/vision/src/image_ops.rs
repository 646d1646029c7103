// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Image decoding and binarization for wall extraction

use crate::config::PipelineConfig;
use crate::error::{Result, VisionError};
use image::{DynamicImage, GrayImage, Luma};
use imageproc::distance_transform::Norm;

/// Decode uploaded bytes into an image, guessing the format from content
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| VisionError::InvalidInput(format!("cannot decode image: {}", e)))?;

    if image.width() == 0 || image.height() == 0 {
        return Err(VisionError::InvalidInput("decoded image is empty".into()));
    }

    Ok(image)
}

/// Turn a floor plan into a binary mask where walls are white (255)
pub fn preprocess(image: &DynamicImage, config: &PipelineConfig) -> GrayImage {
    let mut gray = image.to_luma8();

    if config.equalize_histogram {
        gray = imageproc::contrast::equalize_histogram(&gray);
    }

    if let Some(sigma) = config.blur_sigma.filter(|s| *s > 0.0) {
        gray = gaussian_blur(&gray, sigma);
    }

    let binary = threshold_inverted(&gray, config.binary_threshold);

    if config.close_radius > 0 {
        morphological_close(&binary, config.close_radius)
    } else {
        binary
    }
}

/// Apply Gaussian blur for noise reduction
pub fn gaussian_blur(image: &GrayImage, sigma: f32) -> GrayImage {
    imageproc::filter::gaussian_blur_f32(image, sigma)
}

/// Morphological closing (dilate then erode) with a square kernel - fills small gaps
pub fn morphological_close(image: &GrayImage, radius: u8) -> GrayImage {
    let dilated = imageproc::morphology::dilate(image, Norm::LInf, radius);
    imageproc::morphology::erode(&dilated, Norm::LInf, radius)
}

/// Inverted threshold - dark ink becomes white foreground, paper becomes black
pub fn threshold_inverted(image: &GrayImage, threshold_value: u8) -> GrayImage {
    let mut result = GrayImage::new(image.width(), image.height());

    for (x, y, pixel) in image.enumerate_pixels() {
        let value = if pixel.0[0] < threshold_value { 255 } else { 0 };
        result.put_pixel(x, y, Luma([value]));
    }

    result
}
