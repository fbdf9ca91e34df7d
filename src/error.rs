use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ElaError {
    #[error("Codec error: {0}")]
    Codec(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid mask color: {0}")]
    InvalidMaskColor(String),

    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("Image has zero width or height")]
    EmptyImage,

    #[error("Channel array must be HxWx3 with positive dimensions, got {shape:?}")]
    InvalidChannelShape { shape: (usize, usize, usize) },

    #[error("Input not found: {}", .0.display())]
    NotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, ElaError>;
