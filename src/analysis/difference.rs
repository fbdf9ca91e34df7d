use image::RgbImage;
use log::debug;
use ndarray::Array3;

use crate::{
    DifferenceResult,
    error::{ElaError, Result},
    image_utils::{channels_to_rgb, rgb_to_channels},
};

/// Per-channel absolute difference of two equal-sized images, rescaled so the
/// single largest channel difference maps to 255.
pub fn difference(original: &RgbImage, recompressed: &RgbImage) -> Result<DifferenceResult> {
    let (width, height) = original.dimensions();

    if recompressed.dimensions() != (width, height) {
        return Err(ElaError::DimensionMismatch {
            expected: (width, height),
            actual: recompressed.dimensions(),
        });
    }

    let orig = rgb_to_channels(original)?;
    let comp = rgb_to_channels(recompressed)?;

    let mut diff = Array3::zeros((height as usize, width as usize, 3));
    let mut channel_max = [0i32; 3];

    for row in 0..height as usize {
        for col in 0..width as usize {
            for band in 0..3 {
                let d = (orig[[row, col, band]] - comp[[row, col, band]]).abs();

                diff[[row, col, band]] = d;

                if d > channel_max[band] {
                    channel_max[band] = d;
                }
            }
        }
    }

    // Scale by the largest difference of all bands, not per band, so relative
    // magnitudes survive and nothing lands over 255
    let max_difference = channel_max[0].max(channel_max[1]).max(channel_max[2]);

    if max_difference == 0 {
        debug!("recompression reproduced the image exactly, difference is all black");
        return Ok(DifferenceResult {
            image: RgbImage::new(width, height),
            channel_max: [0; 3],
            max_difference: 0,
            scale: 0.0,
        });
    }

    let scale = 255.0 / max_difference as f64;

    for d in diff.iter_mut() {
        *d = ((*d as f64 * scale) as i32).clamp(0, 255);
    }

    Ok(DifferenceResult {
        image: channels_to_rgb(&diff)?,
        channel_max: [
            channel_max[0] as u8,
            channel_max[1] as u8,
            channel_max[2] as u8,
        ],
        max_difference: max_difference as u8,
        scale,
    })
}
