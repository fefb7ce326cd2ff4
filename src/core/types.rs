use serde::{Deserialize, Serialize};

/// Pixel size of a drawing surface or plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_px(self) -> f64 {
        f64::from(self.height)
    }
}

/// Space reserved around a plot area for axes and titles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .all(|value| value.is_finite() && *value >= 0.0)
    }
}

/// Plot area of a chart: the data viewport plus the margins around it.
///
/// Pointer coordinates arrive relative to the outer surface; layout works in
/// plot-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub plot: Viewport,
    pub margins: Margins,
}

impl PlotArea {
    #[must_use]
    pub fn new(plot: Viewport, margins: Margins) -> Self {
        Self { plot, margins }
    }

    /// Full surface size including margins.
    #[must_use]
    pub fn surface(self) -> Viewport {
        let width = self.plot.width_px() + self.margins.left + self.margins.right;
        let height = self.plot.height_px() + self.margins.top + self.margins.bottom;
        Viewport::new(width.round() as u32, height.round() as u32)
    }

    #[must_use]
    pub fn to_local(self, surface_x: f64, surface_y: f64) -> (f64, f64) {
        (surface_x - self.margins.left, surface_y - self.margins.top)
    }

    #[must_use]
    pub fn to_surface(self, local_x: f64, local_y: f64) -> (f64, f64) {
        (local_x + self.margins.left, local_y + self.margins.top)
    }

    #[must_use]
    pub fn contains_local(self, local_x: f64, local_y: f64) -> bool {
        (0.0..=self.plot.width_px()).contains(&local_x)
            && (0.0..=self.plot.height_px()).contains(&local_y)
    }
}

/// Axis-aligned rectangle stored as its two corners.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    #[must_use]
    pub fn from_viewport(viewport: Viewport) -> Self {
        Self::new(0.0, 0.0, viewport.width_px(), viewport.height_px())
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.x1 - self.x0
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.y1 - self.y0
    }

    #[must_use]
    pub fn area(self) -> f64 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    /// Shrinks every side by `amount`; an inverted axis collapses to its midpoint.
    #[must_use]
    pub fn inset(self, amount: f64) -> Self {
        let (mut x0, mut x1) = (self.x0 + amount, self.x1 - amount);
        let (mut y0, mut y1) = (self.y0 + amount, self.y1 - amount);
        if x1 < x0 {
            let mid = (x0 + x1) / 2.0;
            x0 = mid;
            x1 = mid;
        }
        if y1 < y0 {
            let mid = (y0 + y1) / 2.0;
            y0 = mid;
            y1 = mid;
        }
        Self::new(x0, y0, x1, y1)
    }
}
