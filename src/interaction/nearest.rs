use chrono::{NaiveDate, NaiveDateTime};

use crate::core::{InvestmentPoint, PricePoint};

/// Anything ordered along the time axis by a calendar date.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for NaiveDate {
    fn date(&self) -> NaiveDate {
        *self
    }
}

impl Dated for PricePoint {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for InvestmentPoint {
    fn date(&self) -> NaiveDate {
        self.year
    }
}

/// Index of the first element whose date (at midnight) is not before
/// `query`. `series` must be sorted ascending by date.
#[must_use]
pub fn bisect_left<T: Dated>(series: &[T], query: NaiveDateTime) -> usize {
    series.partition_point(|item| NaiveDateTime::from(item.date()) < query)
}

/// Left-biased nearest lookup: the bisect position clamped into the series.
///
/// This is not the numerically closest point; a query between two samples
/// resolves to the later one.
#[must_use]
pub fn nearest_index<T: Dated>(series: &[T], query: NaiveDateTime) -> Option<usize> {
    if series.is_empty() {
        return None;
    }
    Some(bisect_left(series, query).min(series.len() - 1))
}

#[must_use]
pub fn nearest_index_for_date<T: Dated>(series: &[T], query: NaiveDate) -> Option<usize> {
    nearest_index(series, NaiveDateTime::from(query))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn exact_match_returns_its_index() {
        let dates = [ymd(2000, 1, 1), ymd(2001, 1, 1), ymd(2002, 1, 1)];
        assert_eq!(nearest_index_for_date(&dates, ymd(2001, 1, 1)), Some(1));
    }

    #[test]
    fn time_of_day_moves_past_same_day_sample() {
        let dates = [ymd(2000, 1, 1), ymd(2001, 1, 1)];
        let query = ymd(2000, 1, 1).and_hms_opt(12, 0, 0).expect("valid time");
        assert_eq!(nearest_index(&dates, query), Some(1));
    }
}
