use std::io::Cursor;

use image::{RgbImage, codecs::jpeg::JpegEncoder};

use crate::error::{ElaError, Result};

/// One lossy encode/decode round trip at the given quality factor.
///
/// The recompressed copy is what the differencer compares against: regions
/// that already carry heavy JPEG quantization barely change, fresh or
/// doctored regions change more.
pub fn recompress(image: &RgbImage, quality: f32) -> Result<RgbImage> {
    if !(quality > 0.0 && quality <= 1.0) {
        return Err(ElaError::InvalidParameter(format!(
            "Quality must be in (0.0, 1.0], got {quality}"
        )));
    }

    let mut buffer = Cursor::new(Vec::new());

    let encoder = JpegEncoder::new_with_quality(&mut buffer, encoder_quality(quality));
    image.write_with_encoder(encoder)?;

    let recompressed = image::load_from_memory(&buffer.into_inner())?;

    Ok(recompressed.to_rgb8())
}

fn encoder_quality(quality: f32) -> u8 {
    // The JPEG encoder takes 1-100
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;

    #[test]
    fn round_trip_preserves_dimensions() {
        let image = RgbImage::from_fn(24, 16, |x, y| Rgb([x as u8 * 10, y as u8 * 10, 100]));

        let recompressed = recompress(&image, 0.95).unwrap();

        assert_eq!(recompressed.dimensions(), image.dimensions());
    }

    #[test]
    fn out_of_range_quality_is_rejected() {
        let image = RgbImage::new(4, 4);

        assert!(matches!(
            recompress(&image, 0.0),
            Err(ElaError::InvalidParameter(_))
        ));
        assert!(matches!(
            recompress(&image, 1.5),
            Err(ElaError::InvalidParameter(_))
        ));
        assert!(matches!(
            recompress(&image, f32::NAN),
            Err(ElaError::InvalidParameter(_))
        ));
    }

    #[test]
    fn quality_maps_to_encoder_scale() {
        assert_eq!(encoder_quality(0.95), 95);
        assert_eq!(encoder_quality(1.0), 100);
        assert_eq!(encoder_quality(0.004), 1);
    }
}
