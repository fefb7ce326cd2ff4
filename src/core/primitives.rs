use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Rounds to cents the way `Number.toFixed(2)` presents decimal input.
#[must_use]
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Midnight UTC of `date` as unix seconds.
#[must_use]
pub fn date_to_unix_seconds(date: NaiveDate) -> f64 {
    date.and_hms_opt(0, 0, 0)
        .map(|time| time.and_utc().timestamp() as f64)
        .unwrap_or_default()
}

#[must_use]
pub fn unix_seconds_to_datetime(seconds: f64) -> Option<NaiveDateTime> {
    if !seconds.is_finite() {
        return None;
    }
    let millis = (seconds * 1000.0).round() as i64;
    DateTime::from_timestamp_millis(millis).map(|time| time.naive_utc())
}

#[must_use]
pub fn first_of_year(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}

/// `Sat Feb 29 2020`, the short form used in tooltips.
#[must_use]
pub fn format_date_label(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

#[must_use]
pub fn format_year(date: NaiveDate) -> String {
    date.year().to_string()
}

/// `1,234.56`: two decimals with comma grouping.
#[must_use]
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{fraction}")
}

#[must_use]
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_cents(value);
    format!("${}", format_grouped(rounded.to_f64().unwrap_or_default()))
}

/// Compact number label: at most two decimals, trailing zeros dropped.
#[must_use]
pub fn format_compact(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouped_formatting_inserts_commas() {
        assert_eq!(format_grouped(71.08), "71.08");
        assert_eq!(format_grouped(1234.5), "1,234.50");
        assert_eq!(format_grouped(1_234_567.891), "1,234,567.89");
        assert_eq!(format_grouped(-1000.0), "-1,000.00");
    }

    #[test]
    fn compact_formatting_trims_zeros() {
        assert_eq!(format_compact(12.0), "12");
        assert_eq!(format_compact(-3.5), "-3.5");
        assert_eq!(format_compact(-0.001), "0");
    }

    #[test]
    fn date_label_matches_short_form() {
        let date = NaiveDate::from_ymd_opt(2020, 2, 29).expect("date");
        assert_eq!(format_date_label(date), "Sat Feb 29 2020");
    }
}
