// SYNOID Poster Normalizer
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// The one resize + flatten routine shared by training and prediction.
// Changing the target size changes the feature length the classifier
// expects, so both sides must use the same `TargetSize`.

use crate::error::{GenreError, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb32FImage};
use serde::{Deserialize, Serialize};

/// Every normalized poster is RGB.
pub const CHANNELS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSize {
    /// Rows.
    pub height: u32,
    /// Columns.
    pub width: u32,
}

impl Default for TargetSize {
    fn default() -> Self {
        Self {
            height: 148,
            width: 100,
        }
    }
}

impl TargetSize {
    pub fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }

    /// Length of a flattened poster at this size.
    pub fn feature_len(&self) -> usize {
        self.height as usize * self.width as usize * CHANNELS
    }
}

/// Resize `image` to `size` and flatten it row-major (H x W x C).
///
/// Samples are converted to floats in [0,1] first, so 8-bit, 16-bit and
/// float inputs all land in the same range. Images already at the target
/// size are not resampled, which makes the routine idempotent.
pub fn normalize_image(image: &DynamicImage, size: TargetSize) -> Result<(Rgb32FImage, Vec<f64>)> {
    if image.width() == 0 || image.height() == 0 {
        return Err(GenreError::EmptyDataset(
            "cannot normalize a 0-pixel image".to_string(),
        ));
    }

    let rgb = image.to_rgb32f();
    let resized = if rgb.dimensions() == (size.width, size.height) {
        rgb
    } else {
        imageops::resize(&rgb, size.width, size.height, FilterType::Triangle)
    };

    let flattened: Vec<f64> = resized.as_raw().iter().map(|&v| f64::from(v)).collect();
    Ok((resized, flattened))
}
