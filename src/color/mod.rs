//! Value-to-color mapping for treemap cells and the return legend.

pub mod diverging;
pub mod palette;

pub use diverging::{
    DivergingColorScale, DivergingColors, LegendTick, NEGATIVE_COLOR, NEUTRAL_COLOR,
    POSITIVE_COLOR,
};
pub use palette::{CategoricalPalette, CellFill, SET2_HEX};
