use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One index constituent after the performance join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub name: String,
    pub symbol: String,
    /// Index weight as a 0..=1 fraction; never negative or non-finite.
    pub weight: f64,
    pub price: String,
    /// Return text as published, shown verbatim in tooltips.
    pub ytd_return_text: String,
    /// Parsed return; `None` means no color data for this record.
    pub ytd_return: Option<f64>,
}

impl CompanyRecord {
    #[must_use]
    pub fn has_return(&self) -> bool {
        self.ytd_return.is_some()
    }
}

/// Dated index value on the historical chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl PricePoint {
    #[must_use]
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Calendar-year percentage return from `history.csv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearReturn {
    pub year: i32,
    pub performance: Decimal,
}

/// Simulated portfolio value on January 1st of `year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentPoint {
    pub year: NaiveDate,
    pub value: Decimal,
}
