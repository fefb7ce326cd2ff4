//! Pointer handling: nearest-point lookup, hover state and the tooltip.

pub mod nearest;
pub mod tooltip;

use serde::{Deserialize, Serialize};

use crate::core::PlotArea;

pub use nearest::{Dated, bisect_left, nearest_index, nearest_index_for_date};
pub use tooltip::{Tooltip, TooltipLine, TooltipStyle};

/// Pointer position relative to the drawing surface origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Position inside the plot, margins removed.
    #[must_use]
    pub fn local(self, area: PlotArea) -> (f64, f64) {
        area.to_local(self.x, self.y)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// What the pointer currently rests on, in plot-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HoverState {
    pub visible: bool,
    pub index: Option<usize>,
    pub x: f64,
    pub y: f64,
}

impl HoverState {
    pub fn snap(&mut self, index: usize, x: f64, y: f64) {
        self.visible = true;
        self.index = Some(index);
        self.x = x;
        self.y = y;
    }

    pub fn on_pointer_leave(&mut self) {
        self.visible = false;
        self.index = None;
    }
}
