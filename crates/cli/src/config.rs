use std::{collections::HashMap, env, path::PathBuf};

use anyhow::{bail, Context, Result};
use portfolio_dashboard_core::models::chart::SortKey;
use portfolio_dashboard_core::models::settings::{FailurePolicy, Settings};

/// Where the positions are read from.
#[derive(Debug, Clone, PartialEq)]
pub enum PortfolioInput {
    /// Built-in demo list
    Sample,
    CsvFile(PathBuf),
    Spreadsheet(String),
}

impl PortfolioInput {
    /// Short name for logs. Never includes the sheet URL, which may carry a token.
    pub fn label(&self) -> &'static str {
        match self {
            PortfolioInput::Sample => "sample",
            PortfolioInput::CsvFile(_) => "csv file",
            PortfolioInput::Spreadsheet(_) => "spreadsheet",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteSourceKind {
    Yahoo,
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Everything the binary needs, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub settings: Settings,
    pub portfolio: PortfolioInput,
    pub quote_source: QuoteSourceKind,
    pub fixed_prices: HashMap<String, f64>,
    pub sort_by: SortKey,
    pub log_format: LogFormat,
    pub chart_width: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key → value lookup. Unset keys take defaults;
    /// set-but-malformed keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Settings::default();

        let fx_rate = match get("FX_RATE") {
            Some(raw) => raw
                .parse::<f64>()
                .with_context(|| format!("FX_RATE must be a number, got '{raw}'"))?,
            None => defaults.fx_rate,
        };

        let max_concurrency = match get("MAX_CONCURRENCY") {
            Some(raw) => raw
                .parse::<usize>()
                .with_context(|| format!("MAX_CONCURRENCY must be a positive integer, got '{raw}'"))?,
            None => defaults.max_concurrency,
        };

        let failure_policy = match get("FAILURE_POLICY") {
            Some(raw) => raw.parse::<FailurePolicy>().map_err(anyhow::Error::msg)?,
            None => defaults.failure_policy,
        };

        let local_suffixes = get("LOCAL_SUFFIXES")
            .map(|raw| split_list(&raw))
            .unwrap_or(defaults.local_suffixes);

        let settings = Settings {
            reporting_currency: get("REPORTING_CURRENCY")
                .map(|c| c.to_uppercase())
                .unwrap_or(defaults.reporting_currency),
            foreign_currency: get("FOREIGN_CURRENCY")
                .map(|c| c.to_uppercase())
                .unwrap_or(defaults.foreign_currency),
            fx_rate,
            local_suffixes,
            history_period: get("HISTORY_PERIOD").unwrap_or(defaults.history_period),
            failure_policy,
            max_concurrency,
        };
        settings
            .validate()
            .context("invalid valuation settings")?;

        let portfolio = match (get("PORTFOLIO_CSV"), get("PORTFOLIO_SHEET_URL")) {
            (Some(_), Some(_)) => {
                bail!("set either PORTFOLIO_CSV or PORTFOLIO_SHEET_URL, not both")
            }
            (Some(path), None) => PortfolioInput::CsvFile(PathBuf::from(path)),
            (None, Some(url)) => PortfolioInput::Spreadsheet(url),
            (None, None) => PortfolioInput::Sample,
        };

        let fixed_prices = get("FIXED_PRICES")
            .map(|raw| parse_fixed_prices(&raw))
            .transpose()?
            .unwrap_or_default();

        let quote_source = match get("QUOTE_SOURCE").map(|s| s.to_lowercase()).as_deref() {
            None | Some("yahoo") => QuoteSourceKind::Yahoo,
            Some("fixed") => QuoteSourceKind::Fixed,
            Some(other) => bail!("QUOTE_SOURCE must be 'yahoo' or 'fixed', got '{other}'"),
        };
        if quote_source == QuoteSourceKind::Fixed && fixed_prices.is_empty() {
            bail!("QUOTE_SOURCE=fixed requires FIXED_PRICES (e.g. NVDA=120,2330.TW=600)");
        }

        let sort_by = match get("SORT_BY") {
            Some(raw) => raw.parse::<SortKey>().map_err(anyhow::Error::msg)?,
            None => SortKey::ReturnPct,
        };

        let log_format = match get("LOG_FORMAT").map(|s| s.to_lowercase()).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        let chart_width = get("CHART_WIDTH")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|w| *w > 0)
            .unwrap_or(40);

        Ok(Self {
            settings,
            portfolio,
            quote_source,
            fixed_prices,
            sort_by,
            log_format,
            chart_width,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse `SYMBOL=price` pairs separated by commas.
fn parse_fixed_prices(raw: &str) -> Result<HashMap<String, f64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            let (symbol, value) = item
                .split_once('=')
                .with_context(|| format!("FIXED_PRICES entry '{item}' must look like SYMBOL=price"))?;
            let symbol = symbol.trim().to_uppercase();
            if symbol.is_empty() {
                bail!("FIXED_PRICES entry '{item}' has an empty symbol");
            }
            let price = value
                .trim()
                .parse::<f64>()
                .with_context(|| format!("FIXED_PRICES entry '{item}' has a non-numeric price"))?;
            Ok((symbol, price))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.settings, Settings::default());
        assert_eq!(config.portfolio, PortfolioInput::Sample);
        assert_eq!(config.quote_source, QuoteSourceKind::Yahoo);
        assert_eq!(config.sort_by, SortKey::ReturnPct);
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.chart_width, 40);
    }

    #[test]
    fn reads_valuation_settings() {
        let config = config_from(&[
            ("REPORTING_CURRENCY", "eur"),
            ("FOREIGN_CURRENCY", "usd"),
            ("FX_RATE", "0.92"),
            ("LOCAL_SUFFIXES", ".DE, .F"),
            ("HISTORY_PERIOD", "1mo"),
            ("FAILURE_POLICY", "abort"),
            ("MAX_CONCURRENCY", "4"),
        ])
        .unwrap();

        assert_eq!(config.settings.reporting_currency, "EUR");
        assert_eq!(config.settings.foreign_currency, "USD");
        assert!((config.settings.fx_rate - 0.92).abs() < 1e-12);
        assert_eq!(config.settings.local_suffixes, vec![".DE", ".F"]);
        assert_eq!(config.settings.history_period, "1mo");
        assert_eq!(config.settings.failure_policy, FailurePolicy::AbortPass);
        assert_eq!(config.settings.max_concurrency, 4);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config_from(&[("FX_RATE", "  "), ("PORTFOLIO_CSV", "")]).unwrap();
        assert_eq!(config.settings.fx_rate, 32.5);
        assert_eq!(config.portfolio, PortfolioInput::Sample);
    }

    #[test]
    fn rejects_non_numeric_fx_rate() {
        let err = config_from(&[("FX_RATE", "abc")]).unwrap_err();
        assert!(err.to_string().contains("FX_RATE"));
    }

    #[test]
    fn rejects_zero_fx_rate() {
        assert!(config_from(&[("FX_RATE", "0")]).is_err());
    }

    #[test]
    fn rejects_both_portfolio_inputs() {
        let err = config_from(&[
            ("PORTFOLIO_CSV", "p.csv"),
            ("PORTFOLIO_SHEET_URL", "https://example.com/export?format=csv"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("not both"));
    }

    #[test]
    fn picks_csv_or_sheet_input() {
        let csv = config_from(&[("PORTFOLIO_CSV", "holdings.csv")]).unwrap();
        assert_eq!(csv.portfolio, PortfolioInput::CsvFile(PathBuf::from("holdings.csv")));

        let sheet = config_from(&[("PORTFOLIO_SHEET_URL", "https://example.com/sheet.csv")]).unwrap();
        assert_eq!(
            sheet.portfolio,
            PortfolioInput::Spreadsheet("https://example.com/sheet.csv".into())
        );
    }

    #[test]
    fn fixed_source_needs_prices() {
        assert!(config_from(&[("QUOTE_SOURCE", "fixed")]).is_err());

        let config = config_from(&[
            ("QUOTE_SOURCE", "fixed"),
            ("FIXED_PRICES", "nvda=120.5, 2330.TW=600"),
        ])
        .unwrap();
        assert_eq!(config.quote_source, QuoteSourceKind::Fixed);
        assert_eq!(config.fixed_prices.get("NVDA"), Some(&120.5));
        assert_eq!(config.fixed_prices.get("2330.TW"), Some(&600.0));
    }

    #[test]
    fn rejects_malformed_fixed_price() {
        assert!(config_from(&[("FIXED_PRICES", "NVDA")]).is_err());
        assert!(config_from(&[("FIXED_PRICES", "NVDA=cheap")]).is_err());
        assert!(config_from(&[("FIXED_PRICES", "=10")]).is_err());
    }

    #[test]
    fn rejects_unknown_quote_source() {
        assert!(config_from(&[("QUOTE_SOURCE", "bloomberg")]).is_err());
    }

    #[test]
    fn reads_sort_and_log_format() {
        let config = config_from(&[("SORT_BY", "value"), ("LOG_FORMAT", "JSON")]).unwrap();
        assert_eq!(config.sort_by, SortKey::MarketValue);
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
