use std::path::Path;

use image::{DynamicImage, RgbImage};
use serde::{Deserialize, Serialize};

use crate::{
    analysis::{difference, mask, recompress},
    error::Result,
    palette::MaskColor,
};

pub mod analysis;
pub mod batch;
pub mod error;
pub mod image_utils;
pub mod palette;
pub mod report;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElaConfig {
    pub quality: f32,
    pub threshold: i32,
    pub mask_color: MaskColor,
    pub parallel: bool,
}

impl Default for ElaConfig {
    fn default() -> Self {
        Self {
            quality: 0.95,
            threshold: 15,
            mask_color: MaskColor::MAGENTA,
            parallel: true,
        }
    }
}

/// Runs the recompress -> difference -> mask pipeline over one image.
pub struct ElaAnalyzer {
    original: RgbImage,
    config: ElaConfig,
}

impl ElaAnalyzer {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let original = image::open(path)?;

        Ok(Self::from_image(original))
    }

    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            original: image.to_rgb8(),
            config: ElaConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ElaConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_quality(mut self, quality: f32) -> Self {
        self.config.quality = quality;
        self
    }

    pub fn with_threshold(mut self, threshold: i32) -> Self {
        self.config.threshold = threshold;
        self
    }

    pub fn with_mask_color(mut self, color: MaskColor) -> Self {
        self.config.mask_color = color;
        self
    }

    pub fn analyze(&self) -> Result<ElaResult> {
        let recompressed = recompress(&self.original, self.config.quality)?;

        let difference = difference(&self.original, &recompressed)?;

        let masked = mask(
            &self.original,
            &difference.image,
            self.config.mask_color,
            self.config.threshold,
        )?;

        Ok(ElaResult { difference, masked })
    }
}

#[derive(Debug, Clone)]
pub struct ElaResult {
    pub difference: DifferenceResult,
    pub masked: MaskResult,
}

impl ElaResult {
    pub fn save_difference<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.difference.image.save(path)?;
        Ok(())
    }

    pub fn save_masked<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.masked.image.save(path)?;
        Ok(())
    }

    pub fn flagged_fraction(&self) -> f64 {
        let (width, height) = self.masked.image.dimensions();
        let total = width as u64 * height as u64;

        if total == 0 {
            0.0
        } else {
            self.masked.flagged_pixels as f64 / total as f64
        }
    }
}

/// Rescaled difference image plus the raw statistics behind the rescale.
/// `scale` is 0.0 when recompression reproduced the image exactly.
#[derive(Debug, Clone)]
pub struct DifferenceResult {
    pub image: RgbImage,
    pub channel_max: [u8; 3],
    pub max_difference: u8,
    pub scale: f64,
}

#[derive(Debug, Clone)]
pub struct MaskResult {
    pub image: RgbImage,
    pub flagged_pixels: u64,
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;

    fn checkerboard(size: u32) -> DynamicImage {
        let image = RgbImage::from_fn(size, size, |x, y| {
            if (x / 4 + y / 4) % 2 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        });

        DynamicImage::ImageRgb8(image)
    }

    #[test]
    fn default_config_matches_documented_defaults() {
        let config = ElaConfig::default();

        assert_eq!(config.quality, 0.95);
        assert_eq!(config.threshold, 15);
        assert_eq!(config.mask_color, MaskColor::MAGENTA);
        assert!(config.parallel);
    }

    #[test]
    fn analyze_runs_the_full_pipeline() {
        let result = ElaAnalyzer::from_image(checkerboard(32))
            .with_quality(0.5)
            .analyze()
            .unwrap();

        assert_eq!(result.difference.image.dimensions(), (32, 32));
        assert_eq!(result.masked.image.dimensions(), (32, 32));
        // Hard edges at quality 0.5 always leave quantization residue
        assert!(result.difference.max_difference > 0);
    }

    #[test]
    fn masked_pixels_carry_the_configured_color() {
        let result = ElaAnalyzer::from_image(checkerboard(32))
            .with_quality(0.5)
            .with_threshold(-1)
            .with_mask_color(MaskColor::CYAN)
            .analyze()
            .unwrap();

        assert!(result.masked.image.pixels().all(|p| p.0 == [0, 255, 255]));
        assert_eq!(result.flagged_fraction(), 1.0);
    }
}
