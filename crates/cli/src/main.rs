mod config;
mod render;
mod telemetry;

use std::io::Write;

use anyhow::{Context, Result};
use portfolio_dashboard_core::models::chart::{SortDirection, SortKey};
use portfolio_dashboard_core::providers::fixed::FixedQuoteSource;
use portfolio_dashboard_core::sources::csv_file::CsvFileSource;
use portfolio_dashboard_core::sources::csv_format::CurrencyCodes;
use portfolio_dashboard_core::sources::spreadsheet::SpreadsheetSource;
use portfolio_dashboard_core::sources::static_list::StaticPortfolioSource;
use portfolio_dashboard_core::sources::traits::PortfolioSource;
use portfolio_dashboard_core::PortfolioDashboard;
use tracing::info;

use config::{AppConfig, PortfolioInput, QuoteSourceKind};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(e) = run().await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = AppConfig::from_env()?;
    telemetry::init_tracing(config.log_format)?;
    info!(
        portfolio = config.portfolio.label(),
        quote_source = ?config.quote_source,
        reporting_currency = %config.settings.reporting_currency,
        fx_rate = config.settings.fx_rate,
        "starting valuation"
    );

    let dashboard = match config.quote_source {
        QuoteSourceKind::Yahoo => PortfolioDashboard::with_yahoo(config.settings.clone())?,
        QuoteSourceKind::Fixed => PortfolioDashboard::new(
            config.settings.clone(),
            Box::new(FixedQuoteSource::from_prices(config.fixed_prices.clone())),
        )?,
    };

    let source = portfolio_source(&config)?;

    let report = dashboard
        .refresh(source.as_ref(), |progress| {
            eprint!("\r{}", render::progress_line(progress));
            let _ = std::io::stderr().flush();
        })
        .await
        .with_context(|| format!("could not value the portfolio from {}", source.name()))?;
    eprintln!();

    let reports = dashboard.report_service();
    let direction = match config.sort_by {
        SortKey::Symbol => SortDirection::Ascending,
        _ => SortDirection::Descending,
    };
    let ordered = reports.sorted_rows(&report.rows, config.sort_by, direction);

    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", render::metrics(&reports.summary_metrics(&report.summary)))?;
    writeln!(
        out,
        "{}",
        render::table(&reports.display_rows(ordered.iter().copied()), &report.reporting_currency)
    )?;
    writeln!(out, "Market value by symbol ({})", report.reporting_currency)?;
    writeln!(
        out,
        "{}",
        render::bar_chart(&reports.bar_chart(report.rows.iter()), config.chart_width)
    )?;
    write!(out, "{}", render::failures(&report.failures))?;

    Ok(())
}

fn portfolio_source(config: &AppConfig) -> Result<Box<dyn PortfolioSource>> {
    let codes = CurrencyCodes {
        reporting: config.settings.reporting_currency.clone(),
        foreign: config.settings.foreign_currency.clone(),
    };

    let source: Box<dyn PortfolioSource> = match &config.portfolio {
        PortfolioInput::Sample => Box::new(StaticPortfolioSource::sample()),
        PortfolioInput::CsvFile(path) => {
            Box::new(CsvFileSource::new(path.clone()).with_currency_codes(codes))
        }
        PortfolioInput::Spreadsheet(url) => {
            Box::new(SpreadsheetSource::new(url.clone())?.with_currency_codes(codes))
        }
    };
    Ok(source)
}
