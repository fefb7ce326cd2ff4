use serde::{Deserialize, Serialize};

use crate::color::DivergingColorScale;
use crate::error::ChartResult;
use crate::render::Color;

/// d3 `schemeSet2`.
pub const SET2_HEX: [&str; 8] = [
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494", "#b3b3b3",
];

/// Fixed palette cycled by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalPalette {
    colors: Vec<Color>,
}

impl CategoricalPalette {
    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> ChartResult<Self> {
        let colors = colors
            .iter()
            .map(|hex| Color::from_hex(hex.as_ref()))
            .collect::<ChartResult<Vec<_>>>()?;
        Ok(Self { colors })
    }

    #[must_use]
    pub fn set2() -> Self {
        Self {
            colors: vec![
                Color::from_rgb8(0x66, 0xc2, 0xa5),
                Color::from_rgb8(0xfc, 0x8d, 0x62),
                Color::from_rgb8(0x8d, 0xa0, 0xcb),
                Color::from_rgb8(0xe7, 0x8a, 0xc3),
                Color::from_rgb8(0xa6, 0xd8, 0x54),
                Color::from_rgb8(0xff, 0xd9, 0x2f),
                Color::from_rgb8(0xe5, 0xc4, 0x94),
                Color::from_rgb8(0xb3, 0xb3, 0xb3),
            ],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// `palette[index % len]`; black for an empty palette.
    #[must_use]
    pub fn color_at(&self, index: usize) -> Color {
        if self.colors.is_empty() {
            return Color::BLACK;
        }
        self.colors[index % self.colors.len()]
    }
}

impl Default for CategoricalPalette {
    fn default() -> Self {
        Self::set2()
    }
}

/// Picks the fill of a treemap cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellFill {
    pub diverging: DivergingColorScale,
    pub palette: CategoricalPalette,
}

impl CellFill {
    #[must_use]
    pub fn new(diverging: DivergingColorScale, palette: CategoricalPalette) -> Self {
        Self { diverging, palette }
    }

    /// Diverging color when the record carries a return, palette otherwise.
    #[must_use]
    pub fn resolve(&self, index: usize, ytd_return: Option<f64>) -> Color {
        match ytd_return {
            Some(value) if value.is_finite() => self.diverging.color(value),
            _ => self.palette.color_at(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set2_matches_hex_table() {
        let parsed = CategoricalPalette::from_hex(&SET2_HEX).expect("valid hex");
        assert_eq!(parsed, CategoricalPalette::set2());
    }

    #[test]
    fn bad_hex_is_rejected() {
        assert!(CategoricalPalette::from_hex(&["#12"]).is_err());
    }
}
