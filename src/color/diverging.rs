use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::render::Color;

/// Default endpoint colors of the return scale.
pub const NEGATIVE_COLOR: Color = Color::from_rgb8(0xff, 0x00, 0x00);
pub const NEUTRAL_COLOR: Color = Color::from_rgb8(0xff, 0xff, 0xff);
pub const POSITIVE_COLOR: Color = Color::from_rgb8(0x00, 0x80, 0x00);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DivergingColors {
    pub negative: Color,
    pub neutral: Color,
    pub positive: Color,
}

impl Default for DivergingColors {
    fn default() -> Self {
        Self {
            negative: NEGATIVE_COLOR,
            neutral: NEUTRAL_COLOR,
            positive: POSITIVE_COLOR,
        }
    }
}

/// Three-stop linear color scale anchored at zero.
///
/// The domain is `[min(lo, 0), 0, max(hi, 0)]` over the observed finite
/// values. Mapping is pure: the scale never changes after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DivergingColorScale {
    low: f64,
    high: f64,
    observed: Option<(f64, f64)>,
    colors: DivergingColors,
}

/// One legend tick: data value, pixel offset along the bar and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendTick {
    pub value: f64,
    pub offset_px: f64,
    pub label: String,
}

impl DivergingColorScale {
    #[must_use]
    pub fn from_values<I>(values: I, colors: DivergingColors) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let observed = values
            .into_iter()
            .filter(|value| value.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, value| match acc {
                None => Some((value, value)),
                Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
            });
        let (low, high) = match observed {
            Some((lo, hi)) => (lo.min(0.0), hi.max(0.0)),
            None => (0.0, 0.0),
        };
        trace!(low, high, "diverging color domain");
        Self {
            low,
            high,
            observed,
            colors,
        }
    }

    /// `[low, 0, high]`.
    #[must_use]
    pub fn domain(&self) -> [f64; 3] {
        [self.low, 0.0, self.high]
    }

    /// Smallest and largest finite input value, if any were seen.
    #[must_use]
    pub fn observed_extent(&self) -> Option<(f64, f64)> {
        self.observed
    }

    #[must_use]
    pub fn colors(&self) -> DivergingColors {
        self.colors
    }

    #[must_use]
    pub fn color(&self, value: f64) -> Color {
        if !value.is_finite() {
            return self.colors.neutral;
        }
        if value < 0.0 {
            if self.low >= 0.0 {
                return self.colors.neutral;
            }
            let t = (value / self.low).clamp(0.0, 1.0);
            self.colors.neutral.lerp(self.colors.negative, t)
        } else {
            if self.high <= 0.0 {
                return self.colors.neutral;
            }
            let t = (value / self.high).clamp(0.0, 1.0);
            self.colors.neutral.lerp(self.colors.positive, t)
        }
    }

    /// Offset of each domain stop along `[0, 1]` of the observed extent,
    /// for drawing the legend gradient.
    #[must_use]
    pub fn gradient_stops(&self) -> Vec<(f64, Color)> {
        let Some((lo, hi)) = self.observed else {
            return vec![(0.0, self.colors.neutral), (1.0, self.colors.neutral)];
        };
        if hi <= lo {
            let color = self.color(lo);
            return vec![(0.0, color), (1.0, color)];
        }
        let span = hi - lo;
        let mut stops = vec![(0.0, self.color(lo))];
        if lo < 0.0 && hi > 0.0 {
            stops.push((-lo / span, self.colors.neutral));
        }
        stops.push((1.0, self.color(hi)));
        stops
    }

    /// `count` evenly spaced ticks across the observed extent, positioned
    /// over a bar `width_px` wide.
    #[must_use]
    pub fn legend_ticks(&self, count: usize, width_px: f64) -> Vec<LegendTick> {
        let Some((lo, hi)) = self.observed else {
            return Vec::new();
        };
        if count == 0 {
            return Vec::new();
        }
        if count == 1 || hi <= lo {
            return vec![LegendTick {
                value: lo,
                offset_px: 0.0,
                label: legend_label(lo),
            }];
        }

        let steps = (count - 1) as f64;
        (0..count)
            .map(|index| {
                let t = index as f64 / steps;
                let value = lo + (hi - lo) * t;
                LegendTick {
                    value,
                    offset_px: t * width_px,
                    label: legend_label(value),
                }
            })
            .collect()
    }
}

fn legend_label(value: f64) -> String {
    format!("{}%", crate::core::primitives::format_compact(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(values: &[f64]) -> DivergingColorScale {
        DivergingColorScale::from_values(values.iter().copied(), DivergingColors::default())
    }

    #[test]
    fn domain_is_anchored_at_zero() {
        assert_eq!(scale(&[5.0, 12.0]).domain(), [0.0, 0.0, 12.0]);
        assert_eq!(scale(&[-8.0, 3.0]).domain(), [-8.0, 0.0, 3.0]);
        assert_eq!(scale(&[]).domain(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn non_finite_inputs_are_ignored_when_building() {
        let scale = scale(&[f64::NAN, -2.0, f64::INFINITY, 4.0]);
        assert_eq!(scale.observed_extent(), Some((-2.0, 4.0)));
    }

    #[test]
    fn gradient_has_neutral_stop_at_zero_crossing() {
        let stops = scale(&[-10.0, 30.0]).gradient_stops();
        assert_eq!(stops.len(), 3);
        assert!((stops[1].0 - 0.25).abs() < 1e-12);
        assert_eq!(stops[1].1, NEUTRAL_COLOR);
    }
}
