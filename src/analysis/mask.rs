use image::RgbImage;
use ndarray::Array3;

use crate::{
    MaskResult,
    error::{ElaError, Result},
    image_utils::{channels_to_rgb, rgb_to_channels},
    palette::MaskColor,
};

/// Composite `base` against a difference image: every pixel whose summed
/// channel magnitude in `mask_source` strictly exceeds `threshold` is painted
/// with `color`, the rest keep their original value.
pub fn mask(
    base: &RgbImage,
    mask_source: &RgbImage,
    color: MaskColor,
    threshold: i32,
) -> Result<MaskResult> {
    let (width, height) = base.dimensions();

    if mask_source.dimensions() != (width, height) {
        return Err(ElaError::DimensionMismatch {
            expected: (width, height),
            actual: mask_source.dimensions(),
        });
    }

    let base_channels = rgb_to_channels(base)?;
    let source = rgb_to_channels(mask_source)?;
    let rgb = color.rgb();

    let mut result = Array3::zeros((height as usize, width as usize, 3));
    let mut flagged = 0u64;

    for row in 0..height as usize {
        for col in 0..width as usize {
            // Total magnitude of the pixel across all bands
            let sum = source[[row, col, 0]] + source[[row, col, 1]] + source[[row, col, 2]];

            if sum > threshold {
                for band in 0..3 {
                    result[[row, col, band]] = rgb[band] as i32;
                }
                flagged += 1;
            } else {
                for band in 0..3 {
                    result[[row, col, band]] = base_channels[[row, col, band]];
                }
            }
        }
    }

    Ok(MaskResult {
        image: channels_to_rgb(&result)?,
        flagged_pixels: flagged,
    })
}
