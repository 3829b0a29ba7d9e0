use async_trait::async_trait;
use tracing::debug;
use yahoo_finance_api as yahoo;

use crate::errors::{CoreError, QuoteError};
use super::traits::QuoteSource;

const PROVIDER: &str = "Yahoo Finance";

/// Yahoo Finance quote source for stock/ETF prices.
///
/// - **Free**: No API key required.
/// - **Coverage**: Global equities and ETFs, exchange suffixes like `.TW`.
/// - **Latest price**: last quote of today's daily candle.
/// - **Historical close**: most recent daily close within the requested range.
///
/// Prices are returned in the listing's native currency.
pub struct YahooFinanceProvider {
    connector: yahoo::YahooConnector,
}

impl YahooFinanceProvider {
    pub fn new() -> Result<Self, CoreError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to create connector: {e}"),
        })?;
        Ok(Self { connector })
    }

    /// Map a connector error onto the typed quote error.
    fn classify(symbol: &str, err: yahoo::YahooError) -> QuoteError {
        match err {
            yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult => {
                QuoteError::InvalidSymbol {
                    symbol: symbol.to_string(),
                }
            }
            other => QuoteError::Network {
                source_name: PROVIDER.into(),
                message: other.to_string(),
            },
        }
    }
}

#[async_trait]
impl QuoteSource for YahooFinanceProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn latest_price(&self, symbol: &str) -> Result<f64, QuoteError> {
        debug!(symbol, "fetching latest quote from Yahoo");

        let resp = self
            .connector
            .get_latest_quotes(symbol, "1d")
            .await
            .map_err(|e| Self::classify(symbol, e))?;

        let quote = resp.last_quote().map_err(|_| QuoteError::MissingField {
            symbol: symbol.to_string(),
            field: "last price".into(),
        })?;

        Ok(quote.close)
    }

    async fn historical_close(&self, symbol: &str, period: &str) -> Result<f64, QuoteError> {
        debug!(symbol, period, "fetching daily history from Yahoo");

        let resp = self
            .connector
            .get_quote_range(symbol, "1d", period)
            .await
            .map_err(|e| Self::classify(symbol, e))?;

        let quotes = resp.quotes().map_err(|e| Self::classify(symbol, e))?;

        quotes
            .iter()
            .filter(|q| q.close.is_finite())
            .max_by_key(|q| q.timestamp)
            .map(|q| q.close)
            .ok_or_else(|| QuoteError::MissingField {
                symbol: symbol.to_string(),
                field: format!("daily close within {period}"),
            })
    }
}
