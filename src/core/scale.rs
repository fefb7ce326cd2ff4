use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Continuous linear mapping from a numeric domain to a pixel range.
///
/// A collapsed domain (start == end) is accepted and maps every value to the
/// middle of the range, so a single-sample series still renders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    /// Vertical value scale: `[0, max]` onto `[height, 0]`.
    pub fn vertical(domain_max: f64, height_px: f64) -> ChartResult<Self> {
        Self::new((0.0, domain_max), (height_px, 0.0))
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.domain_start == self.domain_end
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (value - self.domain_start) / span
        };
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let range_span = self.range_end - self.range_start;
        let normalized = if range_span == 0.0 {
            0.5
        } else {
            (pixel - self.range_start) / range_span
        };
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Round-numbered ticks covering the domain, roughly `count` of them.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        let (start, stop) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };
        nice_ticks(start, stop, count)
    }
}

/// Ticks at 1/2/5 × 10^k steps inside `[start, stop]`.
#[must_use]
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let Some((first, last, increment)) = tick_spec(start, stop, count as f64) else {
        return Vec::new();
    };
    if last < first {
        return Vec::new();
    }

    (first..=last)
        .map(|index| {
            let index = index as f64;
            if increment < 0.0 {
                index / -increment
            } else {
                index * increment
            }
        })
        .collect()
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    let (mut first, mut last, increment);
    if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        first = (start * inc).round() as i64;
        last = (stop * inc).round() as i64;
        if (first as f64) / inc < start {
            first += 1;
        }
        if (last as f64) / inc > stop {
            last -= 1;
        }
        increment = -inc;
    } else {
        let inc = 10f64.powf(power) * factor;
        first = (start / inc).round() as i64;
        last = (stop / inc).round() as i64;
        if (first as f64) * inc < start {
            first += 1;
        }
        if (last as f64) * inc > stop {
            last -= 1;
        }
        increment = inc;
    }

    if last < first && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some((first, last, increment))
}
