use std::collections::HashMap;

use tracing::debug;

use crate::core::primitives::first_of_year;
use crate::core::{CompanyRecord, PricePoint, YearReturn};
use crate::data::csv_loader::{RawRow, field};
use crate::data::parse::{
    parse_calendar_date, parse_decimal_opt, parse_f64_or_zero, parse_percent_fraction,
    parse_return, parse_year,
};

pub mod columns {
    pub const COMPANY: &str = "Company";
    pub const SYMBOL: &str = "Symbol";
    pub const WEIGHT: &str = "Weight";
    pub const PRICE: &str = "Price";
    pub const YTD_RETURN: &str = "YTD Return";
    pub const DATE: &str = "Date";
    pub const SP500: &str = "SP500";
    pub const YEAR: &str = "Year";
    pub const PERFORMANCE: &str = "Performance";
}

/// Secondary row set merged into a primary one by key.
#[derive(Debug, Clone)]
pub struct KeyedAuxiliary {
    pub rows: Vec<RawRow>,
    pub key_column: String,
    /// Columns copied onto matching primary rows.
    pub fields: Vec<String>,
}

impl KeyedAuxiliary {
    #[must_use]
    pub fn new(rows: Vec<RawRow>, key_column: impl Into<String>, fields: &[&str]) -> Self {
        Self {
            rows,
            key_column: key_column.into(),
            fields: fields.iter().map(|name| (*name).to_owned()).collect(),
        }
    }

    /// Key → field values. The first row per key wins; blank values are not
    /// recorded so a later non-blank row can still supply them.
    fn index(&self) -> HashMap<&str, HashMap<&str, &str>> {
        let mut index: HashMap<&str, HashMap<&str, &str>> = HashMap::new();
        for row in &self.rows {
            let key = field(row, &self.key_column);
            if key.is_empty() {
                continue;
            }
            let entry = index.entry(key).or_default();
            for name in &self.fields {
                let value = field(row, name);
                if !value.is_empty() {
                    entry.entry(name.as_str()).or_insert(value);
                }
            }
        }
        index
    }
}

/// Enriches `primary` with the requested fields of every auxiliary set.
///
/// Unmatched keys get `""` for each requested field; nothing here fails.
#[must_use]
pub fn join_by_key(
    mut primary: Vec<RawRow>,
    key_column: &str,
    auxiliaries: &[KeyedAuxiliary],
) -> Vec<RawRow> {
    for auxiliary in auxiliaries {
        let index = auxiliary.index();
        let mut misses = 0usize;
        for row in &mut primary {
            let matched = index.get(field(row, key_column));
            if matched.is_none() {
                misses += 1;
            }
            for name in &auxiliary.fields {
                let value = matched
                    .and_then(|values| values.get(name.as_str()))
                    .copied()
                    .unwrap_or("");
                row.insert(name.clone(), value.to_owned());
            }
        }
        if misses > 0 {
            debug!(
                key_column,
                misses,
                total = primary.len(),
                "join left rows without a match"
            );
        }
    }
    primary
}

/// Types joined constituent rows.
#[must_use]
pub fn normalize_companies(rows: &[RawRow]) -> Vec<CompanyRecord> {
    rows.iter()
        .map(|row| {
            let ytd_return_text = field(row, columns::YTD_RETURN).to_owned();
            CompanyRecord {
                name: field(row, columns::COMPANY).to_owned(),
                symbol: field(row, columns::SYMBOL).to_owned(),
                weight: parse_percent_fraction(field(row, columns::WEIGHT)).max(0.0),
                price: field(row, columns::PRICE).to_owned(),
                ytd_return: parse_return(&ytd_return_text),
                ytd_return_text,
            }
        })
        .collect()
}

/// Constituent rows joined with their performance rows.
#[must_use]
pub fn join_companies(companies: Vec<RawRow>, performance: Vec<RawRow>) -> Vec<CompanyRecord> {
    let auxiliary = KeyedAuxiliary::new(performance, columns::SYMBOL, &[columns::YTD_RETURN]);
    let joined = join_by_key(companies, columns::SYMBOL, &[auxiliary]);
    normalize_companies(&joined)
}

/// Parses one `Date,SP500` row; rows without a readable date are dropped.
#[must_use]
pub fn price_point_from_row(row: &RawRow) -> Option<PricePoint> {
    let date = parse_calendar_date(field(row, columns::DATE))?;
    Some(PricePoint::new(date, parse_f64_or_zero(field(row, columns::SP500))))
}

/// Filters to `min_year` onward, sorts by date and keeps one point per date.
///
/// When dates repeat the later row wins.
#[must_use]
pub fn normalize_price_series(mut points: Vec<PricePoint>, min_year: i32) -> Vec<PricePoint> {
    let cutoff = first_of_year(min_year);
    points.retain(|point| cutoff.is_none_or(|cutoff| point.date >= cutoff));
    points.sort_by_key(|point| point.date);

    let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
    for point in points {
        match deduped.last_mut() {
            Some(last) if last.date == point.date => *last = point,
            _ => deduped.push(point),
        }
    }
    deduped
}

/// Parses one `Year,Performance` row.
#[must_use]
pub fn year_return_from_row(row: &RawRow) -> Option<YearReturn> {
    let year = parse_year(field(row, columns::YEAR))?;
    let performance = parse_decimal_opt(field(row, columns::PERFORMANCE)).unwrap_or_default();
    Some(YearReturn { year, performance })
}

/// Filters to `start_year` onward and sorts by year.
#[must_use]
pub fn normalize_year_returns(mut returns: Vec<YearReturn>, start_year: i32) -> Vec<YearReturn> {
    returns.retain(|entry| entry.year >= start_year);
    returns.sort_by_key(|entry| entry.year);
    returns
}
