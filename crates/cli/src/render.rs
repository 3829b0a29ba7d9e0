use std::fmt::Write;

use portfolio_dashboard_core::models::chart::{BarChartPoint, DisplayRow, SummaryMetrics};
use portfolio_dashboard_core::models::progress::Progress;
use portfolio_dashboard_core::models::valuation::RowFailure;

const BAR: char = '█';

/// One-line progress indicator, e.g. `[##########----------]  2/4 NVDA`.
pub fn progress_line(progress: &Progress) -> String {
    const WIDTH: usize = 20;
    let filled = (progress.fraction() * WIDTH as f64).round() as usize;
    let marker = if progress.succeeded { "" } else { " (no price)" };
    format!(
        "[{}{}] {:>2}/{} {}{}",
        "#".repeat(filled),
        "-".repeat(WIDTH - filled),
        progress.completed,
        progress.total,
        progress.symbol,
        marker
    )
}

pub fn metrics(metrics: &SummaryMetrics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<24} {:>16}", metrics.total_value_label, metrics.total_value);
    let _ = writeln!(
        out,
        "{:<24} {:>16} ({})",
        metrics.total_profit_label, metrics.total_profit, metrics.total_return
    );
    let _ = writeln!(out, "{:<24} {:>16}", metrics.total_cost_label, metrics.total_cost);
    out
}

pub fn table(rows: &[DisplayRow], reporting_currency: &str) -> String {
    let mut out = String::new();
    let value_header = format!("Value ({reporting_currency})");
    let profit_header = format!("Profit ({reporting_currency})");

    let header = format!(
        "{:<10} | {:>10} | {:>10} | {:>10} | {:>4} | {:>16} | {:>16} | {:>9}",
        "Symbol", "Price", "Cost", "Shares", "Cur", value_header, profit_header, "Return %"
    );
    let _ = writeln!(out, "{header}");
    let _ = writeln!(out, "{}", "=".repeat(header.chars().count()));

    for row in rows {
        let _ = writeln!(
            out,
            "{:<10} | {:>10.2} | {:>10} | {:>10} | {:>4} | {:>16.0} | {:>16.0} | {:>9.2}",
            row.symbol,
            row.current_price,
            row.cost_basis,
            row.shares,
            row.currency,
            row.market_value,
            row.profit,
            row.return_pct
        );
    }
    out
}

/// Horizontal bar chart scaled so the largest value spans `width` cells.
pub fn bar_chart(points: &[BarChartPoint], width: usize) -> String {
    let mut out = String::new();
    let max = points
        .iter()
        .map(|p| p.value)
        .fold(0.0_f64, f64::max);
    let label_width = points.iter().map(|p| p.label.len()).max().unwrap_or(0);

    for point in points {
        let cells = if max > 0.0 && point.value > 0.0 {
            ((point.value / max) * width as f64).round().max(1.0) as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "{:<label_width$} {} {:.0}",
            point.label,
            BAR.to_string().repeat(cells),
            point.value,
        );
    }
    out
}

pub fn failures(failures: &[RowFailure]) -> String {
    let mut out = String::new();
    if failures.is_empty() {
        return out;
    }
    let _ = writeln!(out, "Skipped {} position(s) with no price:", failures.len());
    for failure in failures {
        let _ = writeln!(
            out,
            "  {}: latest [{}] {}; historical [{}] {}",
            failure.symbol,
            failure.primary.kind(),
            failure.primary,
            failure.fallback.kind(),
            failure.fallback
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_dashboard_core::errors::QuoteError;

    #[test]
    fn progress_line_fills_proportionally() {
        let line = progress_line(&Progress {
            completed: 2,
            total: 4,
            symbol: "NVDA".into(),
            succeeded: true,
        });
        assert!(line.starts_with("[##########----------]"));
        assert!(line.ends_with(" 2/4 NVDA"));
    }

    #[test]
    fn progress_line_marks_skipped_symbol() {
        let line = progress_line(&Progress {
            completed: 1,
            total: 1,
            symbol: "GONE".into(),
            succeeded: false,
        });
        assert!(line.contains("GONE (no price)"));
    }

    #[test]
    fn bar_chart_scales_to_width() {
        let points = vec![
            BarChartPoint { label: "AAA".into(), value: 100.0 },
            BarChartPoint { label: "B".into(), value: 50.0 },
            BarChartPoint { label: "ZERO".into(), value: 0.0 },
        ];
        let chart = bar_chart(&points, 10);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].matches(BAR).count(), 10);
        assert_eq!(lines[1].matches(BAR).count(), 5);
        assert_eq!(lines[2].matches(BAR).count(), 0);
        assert!(lines[1].starts_with("B    "));
    }

    #[test]
    fn bar_chart_of_nothing_is_empty() {
        assert!(bar_chart(&[], 40).is_empty());
    }

    #[test]
    fn table_has_header_and_one_line_per_row() {
        let rows = vec![DisplayRow {
            symbol: "NVDA".into(),
            current_price: 130.25,
            cost_basis: 120.0,
            shares: 50.0,
            currency: "USD".into(),
            market_value: 211_656.0,
            profit: 16_656.0,
            return_pct: 8.54,
        }];
        let out = table(&rows, "TWD");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Value (TWD)"));
        assert!(lines[2].contains("NVDA"));
        assert!(lines[2].contains("130.25"));
        assert!(lines[2].contains("8.54"));
    }

    #[test]
    fn failures_list_both_reasons() {
        let out = failures(&[RowFailure {
            symbol: "GONE".into(),
            primary: QuoteError::InvalidSymbol { symbol: "GONE".into() },
            fallback: QuoteError::Network {
                source_name: "Yahoo Finance".into(),
                message: "timeout".into(),
            },
        }]);
        assert!(out.contains("Skipped 1 position(s)"));
        assert!(out.contains("GONE: latest [invalid symbol]"));
        assert!(out.contains("historical [network]"));
    }

    #[test]
    fn no_failures_renders_nothing() {
        assert!(failures(&[]).is_empty());
    }
}
