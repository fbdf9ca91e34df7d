use serde::{Deserialize, Serialize};

use crate::error::{ElaError, Result};

/// Flat RGB color painted over pixels the compositor flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskColor(pub [u8; 3]);

pub const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("blue", [0, 0, 255]),
    ("cyan", [0, 255, 255]),
    ("green", [0, 255, 0]),
    ("magenta", [255, 0, 255]),
    ("orange", [255, 128, 0]),
    ("red", [255, 0, 0]),
    ("white", [255, 255, 255]),
    ("yellow", [255, 255, 0]),
];

impl MaskColor {
    pub const BLACK: MaskColor = MaskColor([0, 0, 0]);
    pub const BLUE: MaskColor = MaskColor([0, 0, 255]);
    pub const CYAN: MaskColor = MaskColor([0, 255, 255]);
    pub const GREEN: MaskColor = MaskColor([0, 255, 0]);
    pub const MAGENTA: MaskColor = MaskColor([255, 0, 255]);
    pub const ORANGE: MaskColor = MaskColor([255, 128, 0]);
    pub const RED: MaskColor = MaskColor([255, 0, 0]);
    pub const WHITE: MaskColor = MaskColor([255, 255, 255]);
    pub const YELLOW: MaskColor = MaskColor([255, 255, 0]);

    pub fn from_name(name: &str) -> Result<Self> {
        NAMED_COLORS
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|&(_, rgb)| MaskColor(rgb))
            .ok_or_else(|| ElaError::InvalidMaskColor(format!("Unknown color name '{name}'")))
    }

    /// Exactly three components, in RGB order.
    pub fn from_slice(values: &[u8]) -> Result<Self> {
        match values {
            &[red, green, blue] => Ok(MaskColor([red, green, blue])),
            _ => Err(ElaError::InvalidMaskColor(format!(
                "Expected exactly 3 components, got {}",
                values.len()
            ))),
        }
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.0
    }
}

impl From<[u8; 3]> for MaskColor {
    fn from(rgb: [u8; 3]) -> Self {
        MaskColor(rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_lookup_is_case_insensitive() {
        assert_eq!(MaskColor::from_name("magenta").unwrap(), MaskColor::MAGENTA);
        assert_eq!(MaskColor::from_name("MAGENTA").unwrap(), MaskColor::MAGENTA);
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!(matches!(
            MaskColor::from_name("chartreuse"),
            Err(ElaError::InvalidMaskColor(_))
        ));
    }

    #[test]
    fn slice_must_have_three_components() {
        assert_eq!(
            MaskColor::from_slice(&[1, 2, 3]).unwrap(),
            MaskColor([1, 2, 3])
        );
        assert!(matches!(
            MaskColor::from_slice(&[1, 2]),
            Err(ElaError::InvalidMaskColor(_))
        ));
        assert!(matches!(
            MaskColor::from_slice(&[1, 2, 3, 4]),
            Err(ElaError::InvalidMaskColor(_))
        ));
    }

    #[test]
    fn constants_match_the_table() {
        for &(name, rgb) in NAMED_COLORS {
            assert_eq!(MaskColor::from_name(name).unwrap(), MaskColor(rgb));
        }
    }
}
