use serde::{Deserialize, Serialize};

/// One bar of the market-value chart.
///
/// The core builds these; the frontend only renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartPoint {
    /// Ticker symbol
    pub label: String,

    /// Market value in the reporting currency
    pub value: f64,
}

/// Column a valuation table can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Symbol,
    MarketValue,
    Profit,
    ReturnPct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "symbol" => Ok(SortKey::Symbol),
            "value" | "market_value" => Ok(SortKey::MarketValue),
            "profit" => Ok(SortKey::Profit),
            "return" | "return_pct" => Ok(SortKey::ReturnPct),
            other => Err(format!(
                "unknown sort key '{other}' (expected symbol, value, profit or return)"
            )),
        }
    }
}

/// A valuation row rounded for display.
///
/// Price to 2 decimals, market value and profit to whole units, return to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub symbol: String,
    pub current_price: f64,
    pub cost_basis: f64,
    pub shares: f64,
    pub currency: String,
    pub market_value: f64,
    pub profit: f64,
    pub return_pct: f64,
}

/// The three headline figures shown above the table, already formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    /// e.g. "Total value (TWD)"
    pub total_value_label: String,
    /// e.g. "$1,234,567"
    pub total_value: String,
    pub total_profit_label: String,
    pub total_profit: String,
    /// e.g. "12.3%"
    pub total_return: String,
    pub total_cost_label: String,
    pub total_cost: String,
}
