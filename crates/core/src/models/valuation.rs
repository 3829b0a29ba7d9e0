use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::QuoteError;
use super::position::Currency;
use super::quote::QuoteOrigin;

/// Valuation of a single position. Money fields are in the reporting currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationRow {
    pub symbol: String,

    /// Price in the listing's native currency
    pub current_price: f64,

    /// Per-share cost in the listing's native currency
    pub cost_basis: f64,

    pub shares: f64,

    pub currency: Currency,

    /// current_price × shares (× fx rate for foreign listings)
    pub market_value: f64,

    /// cost_basis × shares (× fx rate for foreign listings)
    pub cost: f64,

    /// market_value − cost
    pub profit: f64,

    /// profit / cost × 100, or 0 when cost is 0
    pub return_pct: f64,

    /// Whether the price came from the latest quote or the historical fallback
    pub price_origin: QuoteOrigin,
}

impl ValuationRow {
    /// `false` when an amount overflowed or turned into NaN.
    pub fn is_finite(&self) -> bool {
        self.market_value.is_finite()
            && self.cost.is_finite()
            && self.profit.is_finite()
            && self.return_pct.is_finite()
    }
}

/// Portfolio totals, derived from the rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationSummary {
    pub total_cost: f64,
    pub total_value: f64,
    pub total_profit: f64,
    pub total_return_pct: f64,
}

impl ValuationSummary {
    /// Sum cost and value over `rows`, then derive profit and return.
    pub fn from_rows(rows: &[ValuationRow]) -> Self {
        let (total_cost, total_value) = rows
            .iter()
            .fold((0.0, 0.0), |(cost, value), row| {
                (cost + row.cost, value + row.market_value)
            });

        let total_profit = total_value - total_cost;

        Self {
            total_cost,
            total_value,
            total_profit,
            total_return_pct: return_pct(total_profit, total_cost),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.total_cost.is_finite()
            && self.total_value.is_finite()
            && self.total_profit.is_finite()
            && self.total_return_pct.is_finite()
    }
}

/// A position left out of the report because no price could be found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowFailure {
    pub symbol: String,
    pub primary: QuoteError,
    pub fallback: QuoteError,
}

/// Output of one evaluation pass: rows, totals, and anything that was skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationReport {
    pub generated_at: DateTime<Utc>,

    /// Currency used for all monetary totals
    pub reporting_currency: String,

    /// Rate applied to foreign listings in this pass
    pub fx_rate: f64,

    /// One row per valued position, in input order
    pub rows: Vec<ValuationRow>,

    pub summary: ValuationSummary,

    /// Positions skipped because every price request failed
    pub failures: Vec<RowFailure>,
}

impl ValuationReport {
    /// `true` when some positions were skipped.
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Symbols that could not be priced.
    pub fn failed_symbols(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.symbol.as_str()).collect()
    }
}

/// `profit / cost × 100`, defined as 0 when `cost` is not positive.
pub fn return_pct(profit: f64, cost: f64) -> f64 {
    if cost > 0.0 {
        (profit / cost) * 100.0
    } else {
        0.0
    }
}
