//! Lenient field parsers.
//!
//! A chart that renders with a zeroed field beats one that does not render,
//! so every parser here falls back to a default instead of failing.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// `"12.3%"` → `0.123`. Blank or unparseable input → `0.0`.
#[must_use]
pub fn parse_percent_fraction(raw: &str) -> f64 {
    let number = parse_f64_or_zero(strip_percent(raw));
    let fraction = number / 100.0;
    if fraction.is_finite() { fraction } else { 0.0 }
}

/// Decimal text with standard semantics. Blank or unparseable → `0.0`.
#[must_use]
pub fn parse_f64_or_zero(raw: &str) -> f64 {
    parse_f64_opt(raw).unwrap_or(0.0)
}

#[must_use]
pub fn parse_f64_opt(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    f64::from_str(&trimmed.replace(',', ""))
        .ok()
        .filter(|value| value.is_finite())
}

/// Signed return such as `"-4.21"` or `"12.5%"`, kept in percent units.
#[must_use]
pub fn parse_return(raw: &str) -> Option<f64> {
    parse_f64_opt(strip_percent(raw))
}

/// Exact decimal parse for values that feed compounding arithmetic.
#[must_use]
pub fn parse_decimal_opt(raw: &str) -> Option<Decimal> {
    let trimmed = strip_percent(raw);
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

#[must_use]
pub fn parse_decimal_or_zero(raw: &str) -> Decimal {
    parse_decimal_opt(raw).unwrap_or(Decimal::ZERO)
}

#[must_use]
pub fn parse_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    i32::from_str(trimmed)
        .ok()
        .or_else(|| parse_f64_opt(trimmed).map(|value| value.trunc() as i32))
}

/// Calendar date in one of the common spreadsheet layouts or RFC 3339.
#[must_use]
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|time| time.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|time| time.date_naive())
        })
}

fn strip_percent(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.strip_suffix('%').map_or(trimmed, str::trim_end)
}
