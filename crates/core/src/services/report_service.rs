use std::cmp::Ordering;

use crate::models::chart::{BarChartPoint, DisplayRow, SortDirection, SortKey, SummaryMetrics};
use crate::models::position::Currency;
use crate::models::valuation::{ValuationRow, ValuationSummary};

/// Shapes a finished valuation for display: ordering, chart series, rounding.
///
/// Nothing here changes a number's meaning; it only orders, rounds and formats.
pub struct ReportService {
    reporting_currency: String,
    foreign_currency: String,
}

impl ReportService {
    pub fn new(reporting_currency: impl Into<String>, foreign_currency: impl Into<String>) -> Self {
        Self {
            reporting_currency: reporting_currency.into(),
            foreign_currency: foreign_currency.into(),
        }
    }

    /// Rows ordered by `key`. Ties keep their input order.
    pub fn sorted_rows<'a>(
        &self,
        rows: &'a [ValuationRow],
        key: SortKey,
        direction: SortDirection,
    ) -> Vec<&'a ValuationRow> {
        let mut sorted: Vec<&ValuationRow> = rows.iter().collect();
        sorted.sort_by(|a, b| {
            let ord = match key {
                SortKey::Symbol => a.symbol.cmp(&b.symbol),
                SortKey::MarketValue => cmp_f64(a.market_value, b.market_value),
                SortKey::Profit => cmp_f64(a.profit, b.profit),
                SortKey::ReturnPct => cmp_f64(a.return_pct, b.return_pct),
            };
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
        sorted
    }

    /// Best performers first.
    pub fn default_order<'a>(&self, rows: &'a [ValuationRow]) -> Vec<&'a ValuationRow> {
        self.sorted_rows(rows, SortKey::ReturnPct, SortDirection::Descending)
    }

    /// Market value per symbol, in the order given.
    pub fn bar_chart<'a, I>(&self, rows: I) -> Vec<BarChartPoint>
    where
        I: IntoIterator<Item = &'a ValuationRow>,
    {
        rows.into_iter()
            .map(|row| BarChartPoint {
                label: row.symbol.clone(),
                value: row.market_value,
            })
            .collect()
    }

    pub fn display_rows<'a, I>(&self, rows: I) -> Vec<DisplayRow>
    where
        I: IntoIterator<Item = &'a ValuationRow>,
    {
        rows.into_iter()
            .map(|row| DisplayRow {
                symbol: row.symbol.clone(),
                current_price: round_to(row.current_price, 2),
                cost_basis: row.cost_basis,
                shares: row.shares,
                currency: match row.currency {
                    Currency::Local => self.reporting_currency.clone(),
                    Currency::Foreign => self.foreign_currency.clone(),
                },
                market_value: round_to(row.market_value, 0),
                profit: round_to(row.profit, 0),
                return_pct: round_to(row.return_pct, 2),
            })
            .collect()
    }

    pub fn summary_metrics(&self, summary: &ValuationSummary) -> SummaryMetrics {
        let cur = &self.reporting_currency;
        SummaryMetrics {
            total_value_label: format!("Total value ({cur})"),
            total_value: format_amount(summary.total_value),
            total_profit_label: format!("Total profit ({cur})"),
            total_profit: format_amount(summary.total_profit),
            total_return: format!("{:.1}%", summary.total_return_pct),
            total_cost_label: format!("Total cost ({cur})"),
            total_cost: format_amount(summary.total_cost),
        }
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Whole units with thousands separators, e.g. `-$1,234,568`.
pub fn format_amount(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
