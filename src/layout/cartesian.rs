use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::primitives::decimal_to_f64;
use crate::core::{InvestmentPoint, LinearScale, PricePoint, TimeScale, Viewport};
use crate::error::{ChartError, ChartResult};

/// Plot-local pixel position of one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

/// How a line passes through its samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCurve {
    Linear,
    #[default]
    MonotoneX,
}

/// Steps drawn per segment when a curve is flattened into a polyline.
pub const CURVE_SAMPLES_PER_SEGMENT: usize = 8;

impl LineCurve {
    /// Polyline points that trace the curve through `points`.
    #[must_use]
    pub fn flatten(self, points: &[ProjectedPoint]) -> Vec<ProjectedPoint> {
        match self {
            Self::Linear => points.to_vec(),
            Self::MonotoneX => monotone_x(points, CURVE_SAMPLES_PER_SEGMENT),
        }
    }
}

/// Cubic through `points` (ascending x) that stays monotone between
/// neighbours, flattened to `samples` steps per segment.
///
/// Interior slopes follow Steffen; end slopes are the one-sided estimate.
/// Fewer than three points are returned unchanged.
#[must_use]
pub fn monotone_x(points: &[ProjectedPoint], samples: usize) -> Vec<ProjectedPoint> {
    let n = points.len();
    if n < 3 || samples < 2 {
        return points.to_vec();
    }

    let secant = |i: usize| {
        let h = points[i + 1].x - points[i].x;
        if h == 0.0 { 0.0 } else { (points[i + 1].y - points[i].y) / h }
    };
    let mut tangents = vec![0.0_f64; n];
    for i in 1..n - 1 {
        let h0 = points[i].x - points[i - 1].x;
        let h1 = points[i + 1].x - points[i].x;
        let (s0, s1) = (secant(i - 1), secant(i));
        let p = if h0 + h1 == 0.0 { 0.0 } else { (s0 * h1 + s1 * h0) / (h0 + h1) };
        let slope = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
        tangents[i] = if slope.is_finite() { slope } else { 0.0 };
    }
    tangents[0] = (3.0 * secant(0) - tangents[1]) / 2.0;
    tangents[n - 1] = (3.0 * secant(n - 2) - tangents[n - 2]) / 2.0;

    let mut out = Vec::with_capacity(1 + (n - 1) * samples);
    out.push(points[0]);
    for i in 0..n - 1 {
        let (a, b) = (points[i], points[i + 1]);
        let third = (b.x - a.x) / 3.0;
        let c1 = a.y + third * tangents[i];
        let c2 = b.y - third * tangents[i + 1];
        for step in 1..=samples {
            let u = step as f64 / samples as f64;
            let v = 1.0 - u;
            out.push(ProjectedPoint {
                x: a.x + (b.x - a.x) * u,
                y: v * v * v * a.y + 3.0 * v * v * u * c1 + 3.0 * v * u * u * c2 + u * u * u * b.y,
            });
        }
    }
    out
}

/// `-1` for negatives, `1` otherwise (zero counts as positive).
fn sign(value: f64) -> f64 {
    if value < 0.0 { -1.0 } else { 1.0 }
}

/// Time × value mapping for a line chart plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartesianLayout {
    plot: Viewport,
    time_scale: TimeScale,
    value_scale: LinearScale,
}

impl CartesianLayout {
    pub fn new(
        plot: Viewport,
        time_scale: TimeScale,
        value_scale: LinearScale,
    ) -> ChartResult<Self> {
        if !plot.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: plot.width,
                height: plot.height,
            });
        }
        Ok(Self {
            plot,
            time_scale,
            value_scale,
        })
    }

    /// Date extent on x, `[0, max + headroom]` on y.
    pub fn for_prices(series: &[PricePoint], plot: Viewport, headroom: f64) -> ChartResult<Self> {
        let time_scale =
            TimeScale::from_extent(series.iter().map(|point| point.date), plot.width_px())?;
        let max_value = series
            .iter()
            .map(|point| point.value)
            .filter(|value| value.is_finite())
            .fold(0.0_f64, f64::max);
        let value_scale = LinearScale::vertical(max_value + headroom, plot.height_px())?;
        Self::new(plot, time_scale, value_scale)
    }

    /// Year extent on x, `[0, max * factor + offset]` on y.
    pub fn for_investment(
        points: &[InvestmentPoint],
        plot: Viewport,
        factor: f64,
        offset: f64,
    ) -> ChartResult<Self> {
        let time_scale =
            TimeScale::from_extent(points.iter().map(|point| point.year), plot.width_px())?;
        let mut max_value = 0.0_f64;
        for point in points {
            max_value = max_value.max(decimal_to_f64(point.value, "investment value")?);
        }
        let value_scale = LinearScale::vertical(max_value * factor + offset, plot.height_px())?;
        Self::new(plot, time_scale, value_scale)
    }

    #[must_use]
    pub fn plot(self) -> Viewport {
        self.plot
    }

    #[must_use]
    pub fn time_scale(self) -> TimeScale {
        self.time_scale
    }

    #[must_use]
    pub fn value_scale(self) -> LinearScale {
        self.value_scale
    }

    #[must_use]
    pub fn project(self, date: NaiveDate, value: f64) -> ProjectedPoint {
        ProjectedPoint {
            x: self.time_scale.date_to_pixel(date),
            y: self.value_scale.map(value),
        }
    }

    #[must_use]
    pub fn project_prices(self, series: &[PricePoint]) -> Vec<ProjectedPoint> {
        #[cfg(feature = "parallel-projection")]
        {
            use rayon::prelude::*;
            series
                .par_iter()
                .map(|point| self.project(point.date, point.value))
                .collect()
        }

        #[cfg(not(feature = "parallel-projection"))]
        {
            series
                .iter()
                .map(|point| self.project(point.date, point.value))
                .collect()
        }
    }

    pub fn project_investment(
        self,
        points: &[InvestmentPoint],
    ) -> ChartResult<Vec<ProjectedPoint>> {
        points
            .iter()
            .map(|point| {
                decimal_to_f64(point.value, "investment value")
                    .map(|value| self.project(point.year, value))
            })
            .collect()
    }

    /// Value-axis ticks with their plot-local y coordinate.
    #[must_use]
    pub fn value_ticks(self, count: usize) -> Vec<(f64, f64)> {
        self.value_scale
            .ticks(count)
            .into_iter()
            .map(|value| (value, self.value_scale.map(value)))
            .collect()
    }

    /// Year ticks with their plot-local x coordinate.
    #[must_use]
    pub fn year_ticks(self, step: u32) -> Vec<(NaiveDate, f64)> {
        self.time_scale
            .year_ticks(step)
            .into_iter()
            .map(|date| (date, self.time_scale.date_to_pixel(date)))
            .collect()
    }
}
