use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::primitives::{first_of_year, round_cents};
use crate::core::{InvestmentPoint, YearReturn};
use crate::error::{ChartError, ChartResult};

/// Non-negative starting amount for the growth simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InvestmentAmount(Decimal);

impl InvestmentAmount {
    pub fn new(value: Decimal) -> ChartResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ChartError::InvalidData(format!(
                "investment amount must be >= 0, got {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn from_f64(value: f64) -> ChartResult<Self> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData(
                "investment amount must be finite".to_owned(),
            ));
        }
        let decimal = Decimal::from_f64(value).ok_or_else(|| {
            ChartError::InvalidData(format!("investment amount {value} is out of range"))
        })?;
        Self::new(decimal)
    }

    #[must_use]
    pub fn value(self) -> Decimal {
        self.0
    }
}

impl Default for InvestmentAmount {
    fn default() -> Self {
        Self(Decimal::TEN)
    }
}

/// User-editable amount that keeps its last valid value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InvestmentInput {
    current: InvestmentAmount,
}

impl InvestmentInput {
    #[must_use]
    pub fn new(initial: InvestmentAmount) -> Self {
        Self { current: initial }
    }

    #[must_use]
    pub fn current(self) -> InvestmentAmount {
        self.current
    }

    /// Applies a new raw input. Returns `true` when the amount changed and
    /// the series has to be recomputed.
    pub fn submit(&mut self, raw: f64) -> bool {
        match InvestmentAmount::from_f64(raw) {
            Ok(amount) if amount != self.current => {
                self.current = amount;
                true
            }
            Ok(_) => false,
            Err(err) => {
                debug!(error = %err, raw, "ignoring investment input");
                false
            }
        }
    }
}

/// Compounds `initial` through `returns` (sorted by year), rounding to
/// cents after every step.
///
/// The output has one more point than `returns`: the starting value on Jan 1
/// of the first return year, then the value after each year.
#[must_use]
pub fn simulate_growth(initial: InvestmentAmount, returns: &[YearReturn]) -> Vec<InvestmentPoint> {
    let Some(first) = returns.first() else {
        return Vec::new();
    };

    let hundred = Decimal::ONE_HUNDRED;
    let mut value = round_cents(initial.value());
    let mut points = Vec::with_capacity(returns.len() + 1);
    let mut push = |offset: usize, value: Decimal| {
        let year = i32::try_from(offset)
            .ok()
            .and_then(|offset| first.year.checked_add(offset))
            .and_then(first_of_year);
        if let Some(year) = year {
            points.push(InvestmentPoint { year, value });
        }
    };

    push(0, value);
    for (index, entry) in returns.iter().enumerate() {
        let factor = Decimal::ONE + entry.performance / hundred;
        value = round_cents(value * factor);
        push(index + 1, value);
    }
    points
}
