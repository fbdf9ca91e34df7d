use image::{Rgb, RgbImage};
use ndarray::Array3;

use crate::error::{ElaError, Result};

/// Unpack an RGB image into a `height x width x 3` channel array.
pub fn rgb_to_channels(image: &RgbImage) -> Result<Array3<i32>> {
    let (width, height) = image.dimensions();

    if width == 0 || height == 0 {
        return Err(ElaError::EmptyImage);
    }

    let mut channels = Array3::zeros((height as usize, width as usize, 3));

    for (x, y, pixel) in image.enumerate_pixels() {
        for band in 0..3 {
            channels[[y as usize, x as usize, band]] = pixel[band] as i32;
        }
    }

    Ok(channels)
}

pub fn channels_to_rgb(channels: &Array3<i32>) -> Result<RgbImage> {
    let (height, width, bands) = channels.dim();

    if height == 0 || width == 0 || bands != 3 {
        return Err(ElaError::InvalidChannelShape {
            shape: channels.dim(),
        });
    }

    let mut image = RgbImage::new(width as u32, height as u32);

    for y in 0..height {
        for x in 0..width {
            let pixel = Rgb([
                channels[[y, x, 0]].clamp(0, 255) as u8,
                channels[[y, x, 1]].clamp(0, 255) as u8,
                channels[[y, x, 2]].clamp(0, 255) as u8,
            ]);
            image.put_pixel(x as u32, y as u32, pixel);
        }
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_is_exact() {
        let image = RgbImage::from_fn(5, 3, |x, y| Rgb([x as u8 * 40, y as u8 * 80, 17]));

        let channels = rgb_to_channels(&image).unwrap();
        let restored = channels_to_rgb(&channels).unwrap();

        assert_eq!(restored, image);
    }

    #[test]
    fn empty_image_is_rejected() {
        let image = RgbImage::new(0, 5);

        assert!(matches!(rgb_to_channels(&image), Err(ElaError::EmptyImage)));
    }

    #[test]
    fn wrong_band_count_is_rejected() {
        let channels = Array3::<i32>::zeros((2, 2, 4));

        assert!(matches!(
            channels_to_rgb(&channels),
            Err(ElaError::InvalidChannelShape { shape: (2, 2, 4) })
        ));
    }

    #[test]
    fn zero_spatial_dimension_is_rejected() {
        let channels = Array3::<i32>::zeros((0, 2, 3));

        assert!(matches!(
            channels_to_rgb(&channels),
            Err(ElaError::InvalidChannelShape { .. })
        ));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut channels = Array3::<i32>::zeros((1, 1, 3));
        channels[[0, 0, 0]] = 300;
        channels[[0, 0, 1]] = -5;
        channels[[0, 0, 2]] = 128;

        let image = channels_to_rgb(&channels).unwrap();

        assert_eq!(image.get_pixel(0, 0).0, [255, 0, 128]);
    }
}
