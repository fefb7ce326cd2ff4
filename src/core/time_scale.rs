use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::core::primitives::{date_to_unix_seconds, first_of_year, unix_seconds_to_datetime};
use crate::error::ChartResult;

/// Horizontal time axis mapping a calendar domain onto `[0, width]`.
///
/// Dates are carried as unix seconds (midnight UTC) so inversion can land
/// between two calendar days, like a pointer does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(start: NaiveDate, end: NaiveDate, width_px: f64) -> ChartResult<Self> {
        let linear = LinearScale::new(
            (date_to_unix_seconds(start), date_to_unix_seconds(end)),
            (0.0, width_px),
        )?;
        Ok(Self { linear })
    }

    /// Fits the domain to the extent of `dates`.
    ///
    /// An empty iterator yields a collapsed domain at the unix epoch.
    pub fn from_extent<I>(dates: I, width_px: f64) -> ChartResult<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut extent: Option<(NaiveDate, NaiveDate)> = None;
        for date in dates {
            extent = Some(match extent {
                None => (date, date),
                Some((min, max)) => (min.min(date), max.max(date)),
            });
        }
        let (start, end) = extent.unwrap_or_default();
        Self::new(start, end, width_px)
    }

    #[must_use]
    pub fn domain_seconds(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn domain_dates(self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        let (start, end) = self.linear.domain();
        (
            unix_seconds_to_datetime(start).map(|time| time.date()),
            unix_seconds_to_datetime(end).map(|time| time.date()),
        )
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        self.linear.range().1
    }

    #[must_use]
    pub fn time_to_pixel(self, seconds: f64) -> f64 {
        self.linear.map(seconds)
    }

    #[must_use]
    pub fn date_to_pixel(self, date: NaiveDate) -> f64 {
        self.time_to_pixel(date_to_unix_seconds(date))
    }

    #[must_use]
    pub fn pixel_to_time(self, pixel: f64) -> f64 {
        self.linear.invert(pixel)
    }

    #[must_use]
    pub fn pixel_to_datetime(self, pixel: f64) -> Option<NaiveDateTime> {
        unix_seconds_to_datetime(self.pixel_to_time(pixel))
    }

    /// January 1st of every `step`-th year inside the domain.
    #[must_use]
    pub fn year_ticks(self, step: u32) -> Vec<NaiveDate> {
        let step = i32::try_from(step.max(1)).unwrap_or(1);
        let (Some(start), Some(end)) = self.domain_dates() else {
            return Vec::new();
        };
        let (start, end) = (start.min(end), start.max(end));

        (start.year()..=end.year())
            .filter(|year| year.rem_euclid(step) == 0)
            .filter_map(first_of_year)
            .filter(|date| *date >= start && *date <= end)
            .collect()
    }
}
