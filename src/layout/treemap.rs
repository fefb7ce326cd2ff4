use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Rect;
use crate::error::{ChartError, ChartResult};

/// Target aspect ratio of squarified rows (the golden ratio).
pub const SQUARIFY_RATIO: f64 = 1.618_033_988_749_895;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreemapConfig {
    /// Outer margin and gap between neighbouring cells.
    pub padding_px: f64,
    pub ratio: f64,
}

impl Default for TreemapConfig {
    fn default() -> Self {
        Self {
            padding_px: 2.0,
            ratio: SQUARIFY_RATIO,
        }
    }
}

impl TreemapConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.padding_px.is_finite() || self.padding_px < 0.0 {
            return Err(ChartError::InvalidData(
                "treemap padding must be finite and >= 0".to_owned(),
            ));
        }
        if !self.ratio.is_finite() || self.ratio < 1.0 {
            return Err(ChartError::InvalidData(
                "treemap ratio must be finite and >= 1".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// One positioned item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreemapLeaf {
    /// Position of the item in the caller's input slice.
    pub index: usize,
    pub weight: f64,
    /// Tiled cell; its area is proportional to `weight`.
    pub cell: Rect,
    /// Drawn rectangle: `cell` minus half the padding on each side.
    pub bounds: Rect,
}

impl TreemapLeaf {
    #[must_use]
    pub fn fits_label(&self, min_label_width_px: f64) -> bool {
        self.bounds.width() >= min_label_width_px
    }
}

/// Flat squarified partition of a rectangle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TreemapLayout {
    /// Region the cells tile (the canvas minus the outer padding).
    pub tiled: Rect,
    pub total_weight: f64,
    /// Leaves in descending weight order.
    pub leaves: Vec<TreemapLeaf>,
}

impl TreemapLayout {
    /// Lays out `weights` inside `canvas`.
    ///
    /// Non-finite or negative weights count as zero and never fail the
    /// layout; their leaves have no area. Equal weights keep their input
    /// order. Empty input or a zero total yields no leaves.
    pub fn compute(weights: &[f64], canvas: Rect, config: TreemapConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let half_pad = config.padding_px / 2.0;
        let tiled = canvas.inset(half_pad);

        let weights: Vec<f64> = weights
            .iter()
            .map(|weight| if weight.is_finite() && *weight > 0.0 { *weight } else { 0.0 })
            .collect();
        let total_weight: f64 = weights.iter().sum();
        if weights.is_empty() || total_weight <= 0.0 {
            debug!(items = weights.len(), "treemap has no positive weight");
            return Ok(Self {
                tiled,
                total_weight,
                leaves: Vec::new(),
            });
        }

        let mut order: Vec<usize> = (0..weights.len()).collect();
        order.sort_by_key(|index| Reverse(OrderedFloat(weights[*index])));
        let sorted: Vec<f64> = order.iter().map(|index| weights[*index]).collect();

        let cells = squarify(&sorted, total_weight, tiled, config.ratio);
        let leaves = order
            .iter()
            .zip(sorted.iter())
            .zip(cells)
            .map(|((index, weight), cell)| TreemapLeaf {
                index: *index,
                weight: *weight,
                cell,
                bounds: cell.inset(half_pad),
            })
            .collect();

        Ok(Self {
            tiled,
            total_weight,
            leaves,
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Leaf whose drawn rectangle contains the point, if any.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&TreemapLeaf> {
        self.leaves
            .iter()
            .find(|leaf| leaf.bounds.area() > 0.0 && leaf.bounds.contains(x, y))
    }
}

/// Squarified tiling over values sorted in descending order.
///
/// Rows grow while the worst aspect ratio against `ratio` does not get
/// worse; each row is laid across the shorter side of the remaining space.
fn squarify(values: &[f64], total: f64, area: Rect, ratio: f64) -> Vec<Rect> {
    let count = values.len();
    let mut cells = vec![Rect::default(); count];
    let (mut x0, mut y0, x1, y1) = (area.x0, area.y0, area.x1, area.y1);
    let mut remaining = total;
    let mut row_start = 0usize;
    let mut row_end = 0usize;

    while row_start < count {
        let dx = x1 - x0;
        let dy = y1 - y0;
        if dx <= 0.0 || dy <= 0.0 {
            for cell in &mut cells[row_start..] {
                *cell = Rect::new(x0, y0, x0.max(x1), y0.max(y1));
            }
            break;
        }

        let mut sum = loop {
            let value = values[row_end];
            row_end += 1;
            if value != 0.0 || row_end >= count {
                break value;
            }
        };
        let (mut min_value, mut max_value) = (sum, sum);
        let alpha = (dy / dx).max(dx / dy) / (remaining * ratio);
        let mut beta = sum * sum * alpha;
        let mut min_ratio = (max_value / beta).max(beta / min_value);

        while row_end < count {
            let value = values[row_end];
            sum += value;
            min_value = min_value.min(value);
            max_value = max_value.max(value);
            beta = sum * sum * alpha;
            let new_ratio = (max_value / beta).max(beta / min_value);
            if new_ratio > min_ratio {
                sum -= value;
                break;
            }
            min_ratio = new_ratio;
            row_end += 1;
        }

        let row = row_start..row_end;
        if dx < dy {
            let row_y1 = if remaining > 0.0 { y0 + dy * sum / remaining } else { y1 };
            dice(&values[row.clone()], sum, Rect::new(x0, y0, x1, row_y1), &mut cells[row]);
            y0 = row_y1;
        } else {
            let row_x1 = if remaining > 0.0 { x0 + dx * sum / remaining } else { x1 };
            slice(&values[row.clone()], sum, Rect::new(x0, y0, row_x1, y1), &mut cells[row]);
            x0 = row_x1;
        }
        remaining -= sum;
        row_start = row_end;
    }

    cells
}

/// Lays a row left to right across the full width of `bounds`.
fn dice(values: &[f64], sum: f64, bounds: Rect, out: &mut [Rect]) {
    let k = if sum > 0.0 { bounds.width() / sum } else { 0.0 };
    let mut x = bounds.x0;
    for (value, cell) in values.iter().zip(out.iter_mut()) {
        let next = x + value * k;
        *cell = Rect::new(x, bounds.y0, next, bounds.y1);
        x = next;
    }
}

/// Lays a row top to bottom across the full height of `bounds`.
fn slice(values: &[f64], sum: f64, bounds: Rect, out: &mut [Rect]) {
    let k = if sum > 0.0 { bounds.height() / sum } else { 0.0 };
    let mut y = bounds.y0;
    for (value, cell) in values.iter().zip(out.iter_mut()) {
        let next = y + value * k;
        *cell = Rect::new(bounds.x0, y, bounds.x1, next);
        y = next;
    }
}
